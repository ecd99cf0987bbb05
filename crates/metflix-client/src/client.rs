//! HTTP client for the media catalog

use async_trait::async_trait;
use metflix_core::{
    FetchError, GenreCatalog, MediaKind, NetworkError, PageResponse, PageSource, Query, ResultItem,
};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::wire::{decode_genres, decode_page};

/// Client for the catalog's JSON API
///
/// Performs a single attempt per call; callers decide whether to retry.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: Client,
    config: ClientConfig,
}

impl TmdbClient {
    /// Create a client from a configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        debug!("Catalog client ready for {}", config.base_url);

        Ok(Self { http, config })
    }

    /// Create a client configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the API root
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Poster URL for an item under the configured image base
    pub fn poster_url(&self, item: &ResultItem) -> Option<Url> {
        item.poster_url(&self.config.image_base)
    }

    // ========================================================================
    // Catalog Operations
    // ========================================================================

    /// Fetch one page of results for a query
    pub async fn search_page(&self, query: &Query, page: u32) -> std::result::Result<PageResponse, FetchError> {
        let endpoint = Endpoint::for_query(query);
        let body = self
            .get(&endpoint.path(), endpoint.params(query, page))
            .await?;

        let mut response = decode_page(&body, endpoint.implied_kind())?;

        if endpoint.filters_genres_locally() && !query.filters.genre_ids.is_empty() {
            response
                .items
                .retain(|item| item.has_genres(&query.filters.genre_ids));
        }

        debug!(
            "{} page {}/{}: {} items",
            endpoint.path(),
            response.page_number,
            response.total_pages,
            response.items.len()
        );

        Ok(response)
    }

    /// Fetch the genre list for a media kind
    pub async fn list_genres(&self, kind: MediaKind) -> std::result::Result<GenreCatalog, FetchError> {
        let path = format!("genre/{}/list", kind);
        let body = self.get(&path, Vec::new()).await?;
        decode_genres(&body)
    }

    async fn get(
        &self,
        path: &str,
        params: Vec<(&'static str, String)>,
    ) -> std::result::Result<Vec<u8>, FetchError> {
        let url = self
            .config
            .base_url
            .join(path)
            .map_err(|e| NetworkError::Transport(format!("Invalid request path {}: {}", path, e)))?;

        let mut request = self
            .http
            .get(url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(&params);

        if let Some(language) = &self.config.language {
            request = request.query(&[("language", language.as_str())]);
        }

        debug!("GET {} {:?}", path, params);

        let response = request.send().await.map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} failed with status {}", path, status);
            return Err(NetworkError::Status(status.as_u16()).into());
        }

        let body = response.bytes().await.map_err(network_error)?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl PageSource for TmdbClient {
    async fn fetch_page(&self, query: &Query, page: u32) -> std::result::Result<PageResponse, FetchError> {
        self.search_page(query, page).await
    }
}

fn network_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        NetworkError::Timeout.into()
    } else {
        NetworkError::Transport(e.to_string()).into()
    }
}
