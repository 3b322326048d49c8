//! Dictionary loader: cache first, then the network, then any stale copy.

use crate::cache::CacheStore;
use crate::error::FetchError;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Default dictionary location.
pub const DEFAULT_SOURCE: &str = "https://www.jma.go.jp/bosai/common/const/area.json";

/// Where the raw document comes from.
pub trait Fetcher {
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<String, FetchError>;
}

/// HTTP(S) GET via ureq.
pub struct HttpFetcher {
    url: String,
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(url: &str, timeout: std::time::Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("areadict/", env!("CARGO_PKG_VERSION")))
            .build();
        HttpFetcher {
            url: url.to_string(),
            agent,
        }
    }
}

impl Fetcher for HttpFetcher {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String, FetchError> {
        tracing::info!(url = %self.url, "fetching dictionary");
        let response = self.agent.get(&self.url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => FetchError::Status {
                url: self.url.clone(),
                status,
            },
            ureq::Error::Transport(t) => FetchError::Http {
                url: self.url.clone(),
                message: t.to_string(),
            },
        })?;
        Ok(response.into_string()?)
    }
}

/// Local JSON file.
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileFetcher { path: path.into() }
    }
}

impl Fetcher for FileFetcher {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, FetchError> {
        tracing::debug!(path = %self.path.display(), "reading dictionary file");
        fs::read_to_string(&self.path)
            .map_err(|e| FetchError::Io(format!("{}: {}", self.path.display(), e)))
    }
}

/// Pick a fetcher from a location string: URLs go over HTTP, anything else
/// is a file path.
pub fn fetcher_for(location: &str, timeout: std::time::Duration) -> Box<dyn Fetcher> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpFetcher::new(location, timeout))
    } else {
        Box::new(FileFetcher::new(location))
    }
}

/// How the loader treats the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Use a fresh cached copy, otherwise fetch.
    #[default]
    Default,
    /// Always fetch; a cached copy is only a fallback.
    Refresh,
    /// Never fetch; any cached copy will do.
    Offline,
}

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    FreshCache,
    Fetched,
    StaleCache,
}

/// A parsed dictionary plus its provenance.
#[derive(Debug)]
pub struct Loaded {
    pub value: Value,
    pub origin: Origin,
    pub saved_at: DateTime<Utc>,
}

pub struct DictionaryLoader<'a> {
    fetcher: &'a dyn Fetcher,
    store: &'a dyn CacheStore,
    ttl: Duration,
    policy: LoadPolicy,
}

impl<'a> DictionaryLoader<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, store: &'a dyn CacheStore, ttl: Duration) -> Self {
        DictionaryLoader {
            fetcher,
            store,
            ttl,
            policy: LoadPolicy::Default,
        }
    }

    pub fn policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load the raw dictionary as a JSON value.
    pub fn load(&self, now: DateTime<Utc>) -> Result<Value, FetchError> {
        self.load_with_origin(now).map(|loaded| loaded.value)
    }

    pub fn load_with_origin(&self, now: DateTime<Utc>) -> Result<Loaded, FetchError> {
        let cached = match self.store.load() {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, "cache unreadable, ignoring");
                None
            }
        };

        // Parse the cached copy once; an unparsable copy is as good as none.
        let cached = cached.and_then(|doc| match serde_json::from_str::<Value>(&doc.body) {
            Ok(value) => Some((value, doc.saved_at)),
            Err(e) => {
                tracing::warn!(cache = %self.store.describe(), error = %e, "cached dictionary is not valid JSON");
                None
            }
        });

        let cause = match self.policy {
            LoadPolicy::Offline => "offline mode and no cached copy".to_string(),
            LoadPolicy::Default | LoadPolicy::Refresh => {
                if self.policy == LoadPolicy::Default {
                    if let Some((value, saved_at)) = &cached {
                        if now.signed_duration_since(*saved_at) < self.ttl {
                            tracing::debug!(cache = %self.store.describe(), saved_at = %saved_at, "using fresh cached dictionary");
                            return Ok(Loaded {
                                value: value.clone(),
                                origin: Origin::FreshCache,
                                saved_at: *saved_at,
                            });
                        }
                    }
                }
                match self.fetch_and_store(now) {
                    Ok(value) => {
                        return Ok(Loaded {
                            value,
                            origin: Origin::Fetched,
                            saved_at: now,
                        })
                    }
                    Err(e) => e.to_string(),
                }
            }
        };

        match cached {
            Some((value, saved_at)) => {
                if self.policy != LoadPolicy::Offline {
                    tracing::warn!(cause = %cause, saved_at = %saved_at, "falling back to cached dictionary");
                }
                Ok(Loaded {
                    value,
                    origin: Origin::StaleCache,
                    saved_at,
                })
            }
            None => Err(FetchError::Unavailable {
                source_desc: self.fetcher.describe(),
                cause,
            }),
        }
    }

    fn fetch_and_store(&self, now: DateTime<Utc>) -> Result<Value, FetchError> {
        let body = self.fetcher.fetch()?;
        let value: Value = serde_json::from_str(&body)?;
        if let Err(e) = self.store.save(&body, now) {
            tracing::warn!(error = %e, "could not cache dictionary");
        }
        Ok(value)
    }
}
