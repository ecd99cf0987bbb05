//! Catalog payload shapes and their strict decoding
//!
//! List payloads look like `{results, page, total_pages, total_results}`.
//! Every envelope field is required; a missing or mistyped field is a
//! decode error rather than an empty page.

use chrono::{Datelike, NaiveDate};
use metflix_core::{FetchError, Genre, GenreCatalog, ItemId, MediaKind, PageResponse, ResultItem};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RawPage {
    page: u32,
    results: Vec<RawItem>,
    total_pages: u32,
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: u64,
    media_type: Option<String>,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    vote_average: Option<f64>,
    overview: Option<String>,
    poster_path: Option<String>,
    #[serde(default)]
    genre_ids: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct RawGenres {
    genres: Vec<Genre>,
}

/// Decode a list payload
///
/// `implied_kind` is the kind of every item when the endpoint omits
/// `media_type`. Items of any other kind (people) are dropped.
pub fn decode_page(body: &[u8], implied_kind: Option<MediaKind>) -> Result<PageResponse, FetchError> {
    let raw: RawPage = serde_json::from_slice(body)?;

    if raw.page == 0 {
        return Err(FetchError::Decode("page numbers start at 1".to_string()));
    }

    let mut items = Vec::with_capacity(raw.results.len());
    for raw_item in raw.results {
        if let Some(item) = decode_item(raw_item, implied_kind)? {
            items.push(item);
        }
    }

    Ok(PageResponse {
        items,
        page_number: raw.page,
        total_pages: raw.total_pages,
        total_results: raw.total_results,
    })
}

/// Decode a genre list payload
pub fn decode_genres(body: &[u8]) -> Result<GenreCatalog, FetchError> {
    let raw: RawGenres = serde_json::from_slice(body)?;
    Ok(GenreCatalog::new(raw.genres))
}

fn decode_item(raw: RawItem, implied_kind: Option<MediaKind>) -> Result<Option<ResultItem>, FetchError> {
    let kind = match raw.media_type.as_deref() {
        Some(media_type) => match media_type.parse::<MediaKind>() {
            Ok(kind) => kind,
            Err(_) => {
                debug!("Skipping {} result {}", media_type, raw.id);
                return Ok(None);
            }
        },
        None => implied_kind.ok_or_else(|| {
            FetchError::Decode(format!("result {} has no media_type", raw.id))
        })?,
    };

    let id = ItemId::new(kind, raw.id);

    let (title, date) = match kind {
        MediaKind::Movie => (raw.title.or(raw.name), raw.release_date),
        MediaKind::Tv => (raw.name.or(raw.title), raw.first_air_date),
    };
    let title = title.ok_or_else(|| FetchError::Decode(format!("{} has no title", id)))?;

    Ok(Some(ResultItem {
        id,
        title,
        release_year: date.as_deref().and_then(release_year),
        rating: rating(id, raw.vote_average)?,
        overview: raw.overview.unwrap_or_default(),
        poster_path: raw.poster_path.filter(|path| !path.is_empty()),
        genre_ids: raw.genre_ids,
    }))
}

/// Year of a `YYYY-MM-DD` date; blank or malformed dates are unknown
fn release_year(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

fn rating(id: ItemId, vote_average: Option<f64>) -> Result<Option<f32>, FetchError> {
    match vote_average {
        None => Ok(None),
        Some(v) if !(0.0..=10.0).contains(&v) => Err(FetchError::Decode(format!(
            "{} has rating {} outside 0-10",
            id, v
        ))),
        // Unrated titles report 0
        Some(v) if v == 0.0 => Ok(None),
        Some(v) => Ok(Some(v as f32)),
    }
}
