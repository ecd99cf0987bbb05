//! Query types - what the user asked the catalog for

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::MediaKind;

/// Which kinds of items a query targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Movie,
    Tv,
    #[default]
    Any,
}

impl QueryKind {
    /// The single media kind this scope narrows to, if any
    pub fn media_kind(&self) -> Option<MediaKind> {
        match self {
            QueryKind::Movie => Some(MediaKind::Movie),
            QueryKind::Tv => Some(MediaKind::Tv),
            QueryKind::Any => None,
        }
    }
}

impl From<MediaKind> for QueryKind {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => QueryKind::Movie,
            MediaKind::Tv => QueryKind::Tv,
        }
    }
}

/// Ordering requested from the discovery endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Popularity,
    Rating,
    ReleaseDate,
}

impl SortOrder {
    /// `sort_by` parameter value; release date fields differ per kind
    pub fn as_param(&self, kind: MediaKind) -> &'static str {
        match (self, kind) {
            (SortOrder::Popularity, _) => "popularity.desc",
            (SortOrder::Rating, _) => "vote_average.desc",
            (SortOrder::ReleaseDate, MediaKind::Movie) => "primary_release_date.desc",
            (SortOrder::ReleaseDate, MediaKind::Tv) => "first_air_date.desc",
        }
    }
}

/// Filters narrowing a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryFilters {
    /// Genres every result must carry
    pub genre_ids: BTreeSet<u32>,

    /// Kinds of items to return
    pub kind: QueryKind,

    /// Ordering for discovery queries
    pub sort: SortOrder,
}

impl QueryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: impl Into<QueryKind>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_genre(mut self, genre_id: u32) -> Self {
        self.genre_ids.insert(genre_id);
        self
    }

    pub fn with_genres(mut self, genre_ids: impl IntoIterator<Item = u32>) -> Self {
        self.genre_ids.extend(genre_ids);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Select the genre if absent, deselect it if present
    pub fn toggle_genre(&mut self, genre_id: u32) {
        if !self.genre_ids.remove(&genre_id) {
            self.genre_ids.insert(genre_id);
        }
    }

    pub fn clear_genres(&mut self) {
        self.genre_ids.clear();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A query against the catalog
///
/// Two queries are the same logical query when their trimmed text and
/// filters are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    /// Free-text search terms; empty for browse queries
    pub text: String,

    /// Narrowing filters
    pub filters: QueryFilters,
}

impl Query {
    /// Create a text search with default filters
    pub fn search(text: impl AsRef<str>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            filters: QueryFilters::default(),
        }
    }

    /// Create a browse query without text
    pub fn browse(filters: QueryFilters) -> Self {
        Self {
            text: String::new(),
            filters,
        }
    }

    pub fn with_filters(mut self, filters: QueryFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Whether this query carries search text
    pub fn is_text_search(&self) -> bool {
        !self.text.is_empty()
    }
}
