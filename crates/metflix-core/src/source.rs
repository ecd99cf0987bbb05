//! The page source trait - anything that can fetch a page of results for a query

use std::sync::Arc;

use async_trait::async_trait;

use crate::{FetchError, PageResponse, Query};

/// Fetches one page of results for a query
///
/// Implementations perform exactly one attempt per call. Retrying is the
/// caller's decision.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the 1-based `page` of results for `query`
    async fn fetch_page(&self, query: &Query, page: u32) -> Result<PageResponse, FetchError>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Arc<T> {
    async fn fetch_page(&self, query: &Query, page: u32) -> Result<PageResponse, FetchError> {
        (**self).fetch_page(query, page).await
    }
}
