//! Page fetcher implementations
//!
//! `CatalogFetcher` turns a query key and a page cursor into one catalog
//! request and normalizes the response into a `PageRecord`. Searches that
//! return results are also reported to the search recorder.

use super::shape::QueryShape;
use crate::analytics::SearchRecorder;
use crate::error::FetchError;
use crate::http::CatalogClient;
use crate::pagination::PageRecord;
use crate::types::{Movie, QueryKey};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches one page of a query
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch page `cursor` (1-based) of `key`
    async fn fetch(&self, key: &QueryKey, cursor: u32) -> Result<PageRecord, FetchError>;
}

/// How the search analytics call is run relative to the page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsDispatch {
    /// Await the recorder before returning the page
    #[default]
    Inline,
    /// Spawn the recorder and return the page immediately
    Detached,
}

/// Response body of both catalog listings
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
}

/// Page fetcher backed by the movie catalog API
#[derive(Clone)]
pub struct CatalogFetcher {
    client: CatalogClient,
    recorder: Arc<dyn SearchRecorder>,
    dispatch: AnalyticsDispatch,
}

impl CatalogFetcher {
    /// Create a fetcher that reports searches to `recorder`
    pub fn new(client: CatalogClient, recorder: Arc<dyn SearchRecorder>) -> Self {
        Self {
            client,
            recorder,
            dispatch: AnalyticsDispatch::default(),
        }
    }

    /// Set how the analytics call is dispatched
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: AnalyticsDispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// The underlying HTTP client
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    async fn record_search(&self, term: &str, first: &Movie) {
        match self.dispatch {
            AnalyticsDispatch::Inline => {
                if let Err(e) = self.recorder.record(term, first).await {
                    warn!("Ignoring search analytics failure for '{term}': {e}");
                }
            }
            AnalyticsDispatch::Detached => {
                let recorder = Arc::clone(&self.recorder);
                let term = term.to_string();
                let first = first.clone();
                tokio::spawn(async move {
                    if let Err(e) = recorder.record(&term, &first).await {
                        warn!("Ignoring search analytics failure for '{term}': {e}");
                    }
                });
            }
        }
    }
}

#[async_trait]
impl PageFetcher for CatalogFetcher {
    async fn fetch(&self, key: &QueryKey, cursor: u32) -> Result<PageRecord, FetchError> {
        if cursor == 0 {
            return Err(FetchError::InvalidCursor(cursor));
        }
        let next_cursor = cursor
            .checked_add(1)
            .ok_or(FetchError::InvalidCursor(cursor))?;

        let shape = QueryShape::for_key(key);
        let url = shape.endpoint(self.client.base_url(), cursor)?;
        let page: CatalogPage = self.client.get_json(url).await?;

        debug!(
            "Fetched page {cursor}/{} of {key} ({} movies)",
            page.total_pages,
            page.results.len()
        );

        if let (Some(term), Some(first)) = (shape.term(), page.results.first()) {
            self.record_search(term, first).await;
        }

        Ok(PageRecord::new(page.results, next_cursor, page.total_pages))
    }
}

impl std::fmt::Debug for CatalogFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogFetcher")
            .field("client", &self.client)
            .field("dispatch", &self.dispatch)
            .finish_non_exhaustive()
    }
}
