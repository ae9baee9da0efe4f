//! Pagination controller
//!
//! Owns the session of the current query key and drives the page fetcher.
//!
//! The controller is a cheap cloneable handle; the session lives behind a
//! mutex that is never held across an await. A fetch captures the session
//! generation when it starts, and its response is merged only if no key
//! change happened in the meantime.

use super::cache::SessionCache;
use super::types::{SessionState, Status};
use crate::catalog::PageFetcher;
use crate::types::{Movie, QueryKey};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Result of a fetch request or a query change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was fetched and appended
    Appended { cursor: u32, items: usize },
    /// The fetch failed; the session is now `Failed`
    Failed { cursor: u32, message: String },
    /// Another fetch is already in flight
    Suppressed,
    /// Every available page is loaded
    Exhausted,
    /// The query changed while the fetch was in flight; response dropped
    Discarded { cursor: u32 },
    /// A fresh cached session was restored without fetching
    Restored { pages: usize },
    /// The query key did not change
    Unchanged,
}

impl FetchOutcome {
    /// Whether a request was sent
    pub fn issued_request(&self) -> bool {
        matches!(
            self,
            Self::Appended { .. } | Self::Failed { .. } | Self::Discarded { .. }
        )
    }
}

/// Point-in-time view of a session, for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub key: QueryKey,
    pub items: Vec<Movie>,
    pub page_count: usize,
    pub status: Status,
    pub has_next_page: bool,
    pub is_fetching: bool,
    pub is_fetching_next: bool,
    pub error_message: Option<String>,
}

#[derive(Debug)]
struct Inner {
    key: QueryKey,
    generation: u64,
    session: SessionState,
    cache: SessionCache,
}

/// Pagination controller handle
#[derive(Clone)]
pub struct PaginationController {
    fetcher: Arc<dyn PageFetcher>,
    inner: Arc<Mutex<Inner>>,
}

impl PaginationController {
    /// Create a controller for `key` with the default session cache.
    ///
    /// Nothing is fetched until `start` or `fetch_next` is called.
    pub fn new(fetcher: Arc<dyn PageFetcher>, key: QueryKey) -> Self {
        Self::with_cache(fetcher, key, SessionCache::default())
    }

    /// Create a controller with a custom session cache
    pub fn with_cache(fetcher: Arc<dyn PageFetcher>, key: QueryKey, cache: SessionCache) -> Self {
        Self {
            fetcher,
            inner: Arc::new(Mutex::new(Inner {
                key,
                generation: 0,
                session: SessionState::new(),
                cache,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Key of the current session
    pub fn query_key(&self) -> QueryKey {
        self.lock().key.clone()
    }

    /// All fetched movies of the current session, in fetch order
    pub fn current_items(&self) -> Vec<Movie> {
        self.lock().session.items().cloned().collect()
    }

    pub fn status(&self) -> Status {
        self.lock().session.status()
    }

    pub fn has_next_page(&self) -> bool {
        self.lock().session.has_next_page()
    }

    pub fn is_fetching_next(&self) -> bool {
        self.lock().session.is_fetching_next()
    }

    pub fn is_fetching(&self) -> bool {
        self.lock().session.is_fetching()
    }

    /// Message of the most recent failure, cleared by the next success
    pub fn error_message(&self) -> Option<String> {
        self.lock().session.error_message().map(ToString::to_string)
    }

    pub fn page_count(&self) -> usize {
        self.lock().session.pages().len()
    }

    /// Everything a renderer needs, read under one lock
    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        let session = &inner.session;
        SessionSnapshot {
            key: inner.key.clone(),
            items: session.items().cloned().collect(),
            page_count: session.pages().len(),
            status: session.status(),
            has_next_page: session.has_next_page(),
            is_fetching: session.is_fetching(),
            is_fetching_next: session.is_fetching_next(),
            error_message: session.error_message().map(ToString::to_string),
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Fetch the first page if the session has none yet
    pub async fn start(&self) -> FetchOutcome {
        if self.page_count() > 0 {
            return FetchOutcome::Unchanged;
        }
        self.fetch_next().await
    }

    /// Switch to a new search term (blank means "discover")
    pub async fn set_search_term(&self, term: Option<&str>) -> FetchOutcome {
        self.set_query(QueryKey::new(term)).await
    }

    /// Switch to a new query key.
    ///
    /// The current session is set aside in the cache and any in-flight fetch
    /// for it is abandoned. A fresh cached session for `key` is restored;
    /// otherwise a new session starts and its first page is fetched.
    pub async fn set_query(&self, key: QueryKey) -> FetchOutcome {
        {
            let mut inner = self.lock();
            if inner.key == key {
                return FetchOutcome::Unchanged;
            }

            let old_key = std::mem::replace(&mut inner.key, key.clone());
            let old_session = std::mem::take(&mut inner.session);
            inner.cache.store(old_key, old_session);
            inner.generation += 1;

            if let Some(restored) = inner.cache.take_fresh(&key) {
                let pages = restored.pages().len();
                info!("Restored cached session for {key} ({pages} pages)");
                inner.session = restored;
                return FetchOutcome::Restored { pages };
            }

            info!("Starting new session for {key}");
        }

        self.fetch_next().await
    }

    /// Fetch the next page of the current session.
    ///
    /// No-op while another fetch is in flight or once every page is loaded.
    /// After a failure the same cursor can be retried by calling this again.
    pub async fn fetch_next(&self) -> FetchOutcome {
        let (key, cursor, generation) = {
            let mut inner = self.lock();
            if inner.session.is_fetching() {
                debug!("Fetch already in flight for {}, suppressing", inner.key);
                return FetchOutcome::Suppressed;
            }
            let Some(cursor) = inner.session.next_cursor() else {
                return FetchOutcome::Exhausted;
            };
            inner.session.begin_fetch();
            (inner.key.clone(), cursor, inner.generation)
        };

        let mut guard = InFlight {
            inner: &self.inner,
            generation,
            done: false,
        };
        let result = self.fetcher.fetch(&key, cursor).await;
        guard.done = true;

        let mut inner = self.lock();
        if inner.generation != generation {
            debug!("Discarding page {cursor} of stale session {key}");
            return FetchOutcome::Discarded { cursor };
        }

        match result {
            Ok(page) => {
                let items = page.items.len();
                inner.session.push_page(page);
                debug!(
                    "Appended page {cursor} of {key} ({items} movies, {} pages loaded)",
                    inner.session.pages().len()
                );
                FetchOutcome::Appended { cursor, items }
            }
            Err(e) => {
                warn!("Fetching page {cursor} of {key} failed: {e}");
                let message = e.to_string();
                inner.session.fail(message.clone());
                FetchOutcome::Failed { cursor, message }
            }
        }
    }
}

impl std::fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight marker if a fetch future is dropped before completing
struct InFlight<'a> {
    inner: &'a Mutex<Inner>,
    generation: u64,
    done: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.generation == self.generation {
            inner.session.abandon_fetch();
        }
    }
}
