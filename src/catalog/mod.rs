//! Movie catalog module
//!
//! Builds catalog requests and fetches pages.
//!
//! # Overview
//!
//! A query key maps to one of two listings (`QueryShape`):
//! - `Discover` - `discover/movie?sort_by=popularity.desc&page=N`
//! - `Search` - `search/movie?query=TERM&page=N`
//!
//! `CatalogFetcher` implements `PageFetcher` on top of `CatalogClient`.

mod fetcher;
mod shape;

pub use fetcher::{AnalyticsDispatch, CatalogFetcher, CatalogPage, PageFetcher};
pub use shape::QueryShape;

#[cfg(test)]
mod tests;
