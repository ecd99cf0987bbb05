//! Metflix Client - Query executor for the media catalog API
//!
//! This crate provides:
//! - `TmdbClient`, a `PageSource` backed by the catalog's JSON-over-HTTPS API
//! - Endpoint selection for search, discovery, popular and trending queries
//! - Strict decoding of catalog payloads into `PageResponse`s

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod wire;

pub use client::*;
pub use config::*;
pub use endpoint::*;
pub use error::*;
