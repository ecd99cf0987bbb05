//! Mapping from queries to catalog endpoints

use metflix_core::{MediaKind, Query, QueryKind};

/// A catalog list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Free-text search; `Any` searches movies, TV and people together
    Search { scope: QueryKind },

    /// Genre and sort driven discovery
    Discover { kind: MediaKind },

    /// Popular titles of one kind
    Popular { kind: MediaKind },

    /// Trending movies and TV shows of the week
    Trending,
}

impl Endpoint {
    /// Pick the endpoint that serves a query
    pub fn for_query(query: &Query) -> Self {
        let filters = &query.filters;

        if query.is_text_search() {
            return Endpoint::Search {
                scope: filters.kind,
            };
        }

        match (filters.kind.media_kind(), filters.genre_ids.is_empty()) {
            (Some(kind), true) => Endpoint::Popular { kind },
            (Some(kind), false) => Endpoint::Discover { kind },
            (None, true) => Endpoint::Trending,
            // Discovery needs a concrete kind; the genre lists are movie-first
            (None, false) => Endpoint::Discover {
                kind: MediaKind::Movie,
            },
        }
    }

    /// Path relative to the API root
    pub fn path(&self) -> String {
        match self {
            Endpoint::Search { scope } => match scope.media_kind() {
                Some(kind) => format!("search/{}", kind),
                None => "search/multi".to_string(),
            },
            Endpoint::Discover { kind } => format!("discover/{}", kind),
            Endpoint::Popular { kind } => format!("{}/popular", kind),
            Endpoint::Trending => "trending/all/week".to_string(),
        }
    }

    /// Kind of every item this endpoint returns, when its payload omits `media_type`
    pub fn implied_kind(&self) -> Option<MediaKind> {
        match self {
            Endpoint::Search { scope } => scope.media_kind(),
            Endpoint::Discover { kind } | Endpoint::Popular { kind } => Some(*kind),
            Endpoint::Trending => None,
        }
    }

    /// Whether genre filters must be applied after decoding
    ///
    /// Search endpoints accept no genre parameter.
    pub fn filters_genres_locally(&self) -> bool {
        matches!(self, Endpoint::Search { .. })
    }

    /// Query parameters for one page, excluding credentials
    pub fn params(&self, query: &Query, page: u32) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        match self {
            Endpoint::Search { .. } => {
                params.push(("query", query.text.clone()));
            }
            Endpoint::Discover { kind } => {
                let genres = query
                    .filters
                    .genre_ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                params.push(("with_genres", genres));
                params.push(("sort_by", query.filters.sort.as_param(*kind).to_string()));
            }
            Endpoint::Popular { .. } | Endpoint::Trending => {}
        }

        params.push(("page", page.to_string()));
        params
    }
}
