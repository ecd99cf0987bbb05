//! Metflix Search - Incremental query controller
//!
//! This crate provides:
//! - A staleness guard that numbers query generations
//! - A debouncer that coalesces bursts of input into one trigger
//! - A pagination accumulator that merges pages without duplicates
//! - Pure projections and counts over the accumulated results
//! - `SearchController`, which ties them to a `PageSource`

pub mod accumulator;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod generation;
pub mod projector;

pub use accumulator::*;
pub use controller::*;
pub use debounce::*;
pub use error::*;
pub use generation::*;
pub use projector::*;
