//! areadict — lookup and office resolution over a hierarchical area-code
//! dictionary.
//!
//! The dictionary is one JSON document mapping category → (code → node).
//! [`index::build`] flattens it into an [`AreaIndex`], and
//! [`resolve::resolve_office`] walks parent links from any code to the
//! office-level record that keys the forecast API.

pub mod cache;
pub mod config;
pub mod error;
pub mod fields;
pub mod index;
pub mod links;
pub mod model;
pub mod query;
pub mod render;
pub mod resolve;
pub mod source;

pub use error::{CacheError, FetchError};
pub use index::build;
pub use model::{AreaIndex, AreaRecord, OFFICE_CATEGORY};
pub use resolve::{resolve_office, Reason, Resolution};
