//! Time-stamped storage for the raw dictionary document.
//!
//! A cached copy is two entries: the serialized document and the time it was
//! saved. Freshness is judged by the loader against a fixed window.

use crate::error::CacheError;
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One saved copy of the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedDocument {
    pub body: String,
    pub saved_at: DateTime<Utc>,
}

impl CachedDocument {
    /// Fresh while younger than `ttl`. A save time in the future counts as fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.saved_at) < ttl
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.saved_at)
    }
}

/// Storage for one cached dictionary document.
pub trait CacheStore {
    fn load(&self) -> Result<Option<CachedDocument>, CacheError>;
    fn save(&self, body: &str, saved_at: DateTime<Utc>) -> Result<(), CacheError>;
    fn clear(&self) -> Result<(), CacheError>;
    /// Human-readable location, for logs and `cache status`.
    fn describe(&self) -> String;
}

/// Cache entries in a directory, keyed by the dictionary's source location.
pub struct DirCache {
    body_path: PathBuf,
    stamp_path: PathBuf,
}

impl DirCache {
    pub fn new(dir: &Path, source: &str) -> Self {
        let key = cache_key(source);
        DirCache {
            body_path: dir.join(format!("{key}.json")),
            stamp_path: dir.join(format!("{key}.saved_at")),
        }
    }

    pub fn body_path(&self) -> &Path {
        &self.body_path
    }

    pub fn stamp_path(&self) -> &Path {
        &self.stamp_path
    }
}

impl CacheStore for DirCache {
    fn load(&self) -> Result<Option<CachedDocument>, CacheError> {
        let Some(stamp) = read_optional(&self.stamp_path)? else {
            return Ok(None);
        };
        let saved_at = match DateTime::parse_from_rfc3339(stamp.trim()) {
            Ok(t) => t.with_timezone(&Utc),
            Err(e) => {
                tracing::warn!(path = %self.stamp_path.display(), error = %e, "ignoring unreadable cache timestamp");
                return Ok(None);
            }
        };
        let Some(body) = read_optional(&self.body_path)? else {
            return Ok(None);
        };
        Ok(Some(CachedDocument { body, saved_at }))
    }

    fn save(&self, body: &str, saved_at: DateTime<Utc>) -> Result<(), CacheError> {
        if let Some(dir) = self.body_path.parent() {
            fs::create_dir_all(dir).map_err(|e| CacheError::io(dir, e))?;
        }
        fs::write(&self.body_path, body).map_err(|e| CacheError::io(&self.body_path, e))?;
        fs::write(&self.stamp_path, saved_at.to_rfc3339())
            .map_err(|e| CacheError::io(&self.stamp_path, e))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        for path in [&self.body_path, &self.stamp_path] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(CacheError::io(path, e)),
            }
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.body_path.display().to_string()
    }
}

/// Process-local cache; nothing survives the process.
#[derive(Default)]
pub struct MemoryCache {
    entry: RefCell<Option<CachedDocument>>,
}

impl MemoryCache {
    pub fn with_entry(body: &str, saved_at: DateTime<Utc>) -> Self {
        MemoryCache {
            entry: RefCell::new(Some(CachedDocument {
                body: body.to_string(),
                saved_at,
            })),
        }
    }
}

impl CacheStore for MemoryCache {
    fn load(&self) -> Result<Option<CachedDocument>, CacheError> {
        Ok(self.entry.borrow().clone())
    }

    fn save(&self, body: &str, saved_at: DateTime<Utc>) -> Result<(), CacheError> {
        *self.entry.borrow_mut() = Some(CachedDocument {
            body: body.to_string(),
            saved_at,
        });
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.entry.borrow_mut().take();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Short stable file stem for a source location.
fn cache_key(source: &str) -> String {
    let digest = Sha256::digest(source.as_bytes());
    let hex = format!("{digest:x}");
    format!("area-{}", &hex[..16])
}

fn read_optional(path: &Path) -> Result<Option<String>, CacheError> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CacheError::io(path, e)),
    }
}
