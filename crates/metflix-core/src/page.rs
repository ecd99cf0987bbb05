//! Page responses

use serde::{Deserialize, Serialize};

use crate::ResultItem;

/// One decoded page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Items in catalog order, movies and TV shows only
    pub items: Vec<ResultItem>,

    /// 1-based number of this page
    pub page_number: u32,

    /// Number of pages the catalog reports for the query
    pub total_pages: u32,

    /// Number of raw results the catalog reports, before kind filtering
    pub total_results: u64,
}

impl PageResponse {
    pub fn new(items: Vec<ResultItem>, page_number: u32, total_pages: u32) -> Self {
        let total_results = items.len() as u64;
        Self {
            items,
            page_number,
            total_pages,
            total_results,
        }
    }

    pub fn with_total_results(mut self, total_results: u64) -> Self {
        self.total_results = total_results;
        self
    }

    pub fn is_last(&self) -> bool {
        self.page_number >= self.total_pages
    }
}
