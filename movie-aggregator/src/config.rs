use std::time::Duration;

use crate::error::{AggregatorError, Result};
use crate::selection::DEFAULT_RELEASE_YEAR_PREFIX;

pub const DEFAULT_OMDB_BASE_URL: &str = "http://www.omdbapi.com";
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Provider endpoints, credentials and lookup policy.
#[derive(Clone)]
pub struct Config {
    pub omdb_api_key: String,
    pub tmdb_api_key: String,
    pub omdb_base_url: String,
    pub tmdb_base_url: String,
    pub timeout: Duration,
    pub release_year_prefix: String,
}

impl Config {
    pub fn new(omdb_api_key: impl Into<String>, tmdb_api_key: impl Into<String>) -> Self {
        Self {
            omdb_api_key: omdb_api_key.into(),
            tmdb_api_key: tmdb_api_key.into(),
            omdb_base_url: DEFAULT_OMDB_BASE_URL.to_string(),
            tmdb_base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            release_year_prefix: DEFAULT_RELEASE_YEAR_PREFIX.to_string(),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Blank values count as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| {
                AggregatorError::Config(format!("{} environment variable must be set", key))
            })
        };

        let mut config = Self::new(required("OMDB_API_KEY")?, required("TMDB_API_KEY")?);

        if let Some(url) = get("OMDB_BASE_URL") {
            config.omdb_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = get("TMDB_BASE_URL") {
            config.tmdb_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = get("PROVIDER_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                AggregatorError::Config(format!("PROVIDER_TIMEOUT_SECS is not a number: {}", e))
            })?;
            if secs == 0 {
                return Err(AggregatorError::Config(
                    "PROVIDER_TIMEOUT_SECS must be greater than zero".to_string(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(prefix) = get("RELEASE_YEAR_PREFIX") {
            config.release_year_prefix = prefix.trim().to_string();
        }

        Ok(config)
    }
}

// Keys stay out of debug output and logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("omdb_api_key", &"<redacted>")
            .field("tmdb_api_key", &"<redacted>")
            .field("omdb_base_url", &self.omdb_base_url)
            .field("tmdb_base_url", &self.tmdb_base_url)
            .field("timeout", &self.timeout)
            .field("release_year_prefix", &self.release_year_prefix)
            .finish()
    }
}
