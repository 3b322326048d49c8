//! Runtime defaults and environment-derived locations.

use std::env;
use std::path::PathBuf;

/// Freshness window for the cached dictionary, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 24 * 60 * 60;

/// Timeout for a single dictionary fetch, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum search results shown unless overridden.
pub const DEFAULT_LIMIT: usize = 200;

const CACHE_DIR_NAME: &str = "areadict";

/// Default cache directory: `$XDG_CACHE_HOME/areadict`, then
/// `$HOME/.cache/areadict`, then the system temp directory.
pub fn default_cache_dir() -> PathBuf {
    cache_dir_from(
        env::var_os("XDG_CACHE_HOME").map(PathBuf::from),
        env::var_os("HOME").map(PathBuf::from),
    )
}

fn cache_dir_from(xdg: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = xdg.filter(|p| p.is_absolute()) {
        return dir.join(CACHE_DIR_NAME);
    }
    if let Some(home) = home.filter(|p| !p.as_os_str().is_empty()) {
        return home.join(".cache").join(CACHE_DIR_NAME);
    }
    env::temp_dir().join(CACHE_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_takes_priority() {
        let dir = cache_dir_from(Some("/xdg".into()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/xdg/areadict"));
    }

    #[test]
    fn relative_xdg_is_ignored() {
        let dir = cache_dir_from(Some("rel".into()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/home/u/.cache/areadict"));
    }

    #[test]
    fn falls_back_to_temp() {
        let dir = cache_dir_from(None, None);
        assert_eq!(dir, env::temp_dir().join("areadict"));
    }
}
