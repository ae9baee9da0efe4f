// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Movie Feed
//!
//! An infinite-scroll movie catalog: a paginated list that loads the next
//! page when a sentinel below it scrolls into view.
//!
//! ## Features
//!
//! - **Cursor Pagination**: One session per query, pages appended in order
//! - **Search Reset**: Changing the search term starts a fresh session
//! - **Stale Response Guard**: Responses for an abandoned query are dropped
//! - **Visibility Trigger**: Sentinel observation with a scoped lifetime
//! - **Search Analytics**: Best-effort counting of searched terms
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use movie_feed::{CatalogClient, CatalogFetcher, FeedConfig, HttpClientConfig};
//! use movie_feed::{MovieFeed, NoopRecorder, PaginationController, QueryKey};
//! use movie_feed::{ObserverOptions, ScrollViewport, SentinelId};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> movie_feed::Result<()> {
//!     let config = FeedConfig::default().apply_env();
//!     config.validate()?;
//!
//!     let client = CatalogClient::new(HttpClientConfig::from_catalog(&config.catalog))?;
//!     let fetcher = CatalogFetcher::new(client, Arc::new(NoopRecorder));
//!     let controller = PaginationController::new(Arc::new(fetcher), QueryKey::discover());
//!
//!     let (viewport, mut events) = ScrollViewport::new(480, 24);
//!     let mut feed = MovieFeed::new(controller, viewport.clone(), ObserverOptions::default(), SentinelId(1));
//!     feed.mount().await?;
//!
//!     viewport.scroll_to_end();
//!     while let Ok(entry) = events.try_recv() {
//!         feed.on_intersect(entry).await?;
//!     }
//!     println!("{}", feed.view().render());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          MovieFeed                              │
//! │   mount()   set_search_term()   on_intersect()   view()         │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────┬─────────────┬────────────┐
//! │   Trigger    │     Pagination       │   Catalog   │ Analytics  │
//! ├──────────────┼──────────────────────┼─────────────┼────────────┤
//! │ Observer     │ Session per query    │ Discover    │ File store │
//! │ Observation  │ Generation guard     │ Search      │ Webhook    │
//! │ Viewport     │ Freshness cache      │ Rate limit  │ No-op      │
//! └──────────────┴──────────────────────┴─────────────┴────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Configuration
pub mod config;

/// HTTP client with rate limiting
pub mod http;

/// Catalog page fetcher
pub mod catalog;

/// Search analytics
pub mod analytics;

/// Pagination sessions
pub mod pagination;

/// Sentinel visibility trigger
pub mod trigger;

/// Feed component and view states
pub mod feed;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{AnalyticsError, Error, FetchError, Result};
pub use types::*;

// Re-export commonly used types
pub use analytics::{NoopRecorder, SearchCountStore, SearchRecorder, WebhookRecorder};
pub use catalog::{AnalyticsDispatch, CatalogFetcher, PageFetcher};
pub use config::FeedConfig;
pub use feed::{FeedView, Footer, MovieFeed};
pub use http::{CatalogClient, HttpClientConfig};
pub use pagination::{FetchOutcome, PageRecord, PaginationController, SessionCache, Status};
pub use trigger::{
    IntersectionEntry, ObserverOptions, ScrollViewport, SentinelId, TriggerOutcome,
    ViewportObserver, VisibilityTrigger,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
