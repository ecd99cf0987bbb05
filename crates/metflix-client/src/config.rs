//! Client configuration

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{ClientError, Result};

/// Catalog API root used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Image root for w500 posters
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the catalog client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root; always ends with `/` so endpoint paths join beneath it
    pub base_url: Url,

    /// API key sent as the `api_key` query parameter
    pub api_key: String,

    /// Upper bound for a single request
    pub timeout: Duration,

    /// Optional `language` parameter, e.g. `en-US`
    pub language: Option<String>,

    /// Root that poster paths are joined onto
    pub image_base: Url,
}

impl ClientConfig {
    /// Create a configuration for the public catalog with the given key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            language: None,
            image_base: Url::parse(DEFAULT_IMAGE_BASE_URL)?,
        })
    }

    /// Read configuration from the environment
    ///
    /// `TMDB_API_KEY` is required. `TMDB_BASE_URL`, `TMDB_TIMEOUT_MS`,
    /// `TMDB_LANGUAGE` and `TMDB_IMAGE_BASE_URL` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("TMDB_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ClientError::Config("TMDB_API_KEY must be set".to_string()))?;

        let mut config = Self::new(api_key)?;

        if let Some(base_url) = lookup("TMDB_BASE_URL") {
            config = config.with_base_url(&base_url)?;
        }

        if let Some(timeout) = lookup("TMDB_TIMEOUT_MS") {
            let millis = timeout.trim().parse::<u64>().map_err(|_| {
                ClientError::Config(format!("TMDB_TIMEOUT_MS must be a number, got: {}", timeout))
            })?;
            config = config.with_timeout(Duration::from_millis(millis));
        }

        if let Some(language) = lookup("TMDB_LANGUAGE") {
            config = config.with_language(language);
        }

        if let Some(image_base) = lookup("TMDB_IMAGE_BASE_URL") {
            config = config.with_image_base(&image_base)?;
        }

        Ok(config)
    }

    /// Point the client at another API root
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        let raw = base_url.as_ref().trim();
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{}/", raw)
        };
        self.base_url = Url::parse(&normalized)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_image_base(mut self, image_base: impl AsRef<str>) -> Result<Self> {
        self.image_base = Url::parse(image_base.as_ref().trim())?;
        Ok(self)
    }
}
