//! HTTP client module
//!
//! Provides the catalog HTTP client.
//!
//! # Features
//!
//! - **Authentication**: Bearer token on every request
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Error Mapping**: Status, transport and body failures become `FetchError`

mod client;
mod rate_limit;

pub use client::{CatalogClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::RateLimiter;

#[cfg(test)]
mod tests;
