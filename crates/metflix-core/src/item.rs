//! Result items - normalized movie and TV show records

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CoreError, Result};

/// Kind of catalog entry a result item describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Movie, MediaKind::Tv];

    /// Path segment and `media_type` value used by the catalog API
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "movie" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::Tv),
            other => Err(CoreError::InvalidKind(other.to_string())),
        }
    }
}

/// Unique identifier for a result item
///
/// The catalog numbers movies and TV shows independently, so the remote id
/// alone collides across kinds. The composite form is `"movie-603"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId {
    pub kind: MediaKind,
    pub remote_id: u64,
}

impl ItemId {
    pub fn new(kind: MediaKind, remote_id: u64) -> Self {
        Self { kind, remote_id }
    }

    pub fn movie(remote_id: u64) -> Self {
        Self::new(MediaKind::Movie, remote_id)
    }

    pub fn tv(remote_id: u64) -> Self {
        Self::new(MediaKind::Tv, remote_id)
    }

    /// Parse an ItemId from its composite string form
    pub fn parse(s: &str) -> Result<Self> {
        let (kind, id) = s
            .split_once('-')
            .ok_or_else(|| CoreError::InvalidItemId(s.to_string()))?;
        let kind = kind
            .parse::<MediaKind>()
            .map_err(|_| CoreError::InvalidItemId(s.to_string()))?;
        let remote_id = id
            .parse::<u64>()
            .map_err(|_| CoreError::InvalidItemId(s.to_string()))?;
        Ok(Self { kind, remote_id })
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.remote_id)
    }
}

impl FromStr for ItemId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A normalized movie or TV show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Composite identifier, unique within an accumulated result set
    pub id: ItemId,

    /// Display title (`title` for movies, `name` for TV shows)
    pub title: String,

    /// Year of first release or first air date
    pub release_year: Option<i32>,

    /// Average vote on a 0-10 scale; `None` when unrated
    pub rating: Option<f32>,

    /// Plot overview, empty when the catalog has none
    pub overview: String,

    /// Poster image path relative to the image base
    pub poster_path: Option<String>,

    /// Catalog genre ids attached to the item
    pub genre_ids: Vec<u32>,
}

impl ResultItem {
    /// Create a new item with only the required fields set
    pub fn new(kind: MediaKind, remote_id: u64, title: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(kind, remote_id),
            title: title.into(),
            release_year: None,
            rating: None,
            overview: String::new(),
            poster_path: None,
            genre_ids: Vec::new(),
        }
    }

    pub fn movie(remote_id: u64, title: impl Into<String>) -> Self {
        Self::new(MediaKind::Movie, remote_id, title)
    }

    pub fn tv(remote_id: u64, title: impl Into<String>) -> Self {
        Self::new(MediaKind::Tv, remote_id, title)
    }

    pub fn kind(&self) -> MediaKind {
        self.id.kind
    }

    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    pub fn with_poster_path(mut self, path: impl Into<String>) -> Self {
        self.poster_path = Some(path.into());
        self
    }

    pub fn with_genres(mut self, genre_ids: Vec<u32>) -> Self {
        self.genre_ids = genre_ids;
        self
    }

    /// Whether the item carries every one of the given genres
    pub fn has_genres<'a>(&self, genre_ids: impl IntoIterator<Item = &'a u32>) -> bool {
        genre_ids
            .into_iter()
            .all(|id| self.genre_ids.contains(id))
    }

    /// Full poster URL under the given image base, e.g. `https://image.tmdb.org/t/p/w500`
    pub fn poster_url(&self, image_base: &Url) -> Option<Url> {
        let path = self.poster_path.as_deref()?;
        let base = image_base.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{}/{}", base, path)).ok()
    }
}
