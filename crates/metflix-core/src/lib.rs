//! Metflix Core - Catalog types shared by the query executor and the controller
//!
//! This crate defines the fundamental data structures used throughout Metflix:
//! - `ResultItem`: A normalized movie or TV show record
//! - `Query`: What the user asked for (text plus filters)
//! - `PageResponse`: One decoded page of results
//! - `PageSource`: The capability of fetching a page for a query

pub mod error;
pub mod genre;
pub mod item;
pub mod page;
pub mod query;
pub mod source;

pub use error::*;
pub use genre::*;
pub use item::*;
pub use page::*;
pub use query::*;
pub use source::*;
