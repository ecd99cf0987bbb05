//! Error types for metflix-search

use metflix_core::FetchError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("No active query")]
    NoActiveQuery,
}

pub type Result<T> = std::result::Result<T, SearchError>;
