//! Address search pipeline
//!
//! Query normalization and the geocode client that runs the primary and
//! fallback requests.

pub mod client;
pub mod query;

pub use client::{merge_candidates, GeocodeClient, SearchPlan};
pub use query::SearchQuery;
