//! Error types for loading and caching the raw dictionary.
//!
//! The index builder and resolver never fail; only the I/O boundary does.

use thiserror::Error;

/// Failure to obtain the raw dictionary document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure talking to the remote source
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Remote source answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Local file could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// Document is not valid JSON
    #[error("invalid dictionary JSON: {0}")]
    Parse(String),

    /// Neither a fresh fetch nor any cached copy is available
    #[error("no dictionary available from {source_desc}: {cause}")]
    Unavailable { source_desc: String, cause: String },
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Failure reading or writing the dictionary cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error at {path}: {message}")]
    Io { path: String, message: String },
}

impl CacheError {
    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        CacheError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
