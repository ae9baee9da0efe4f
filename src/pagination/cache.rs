//! Cache of sessions left behind by a query key change
//!
//! Switching back to a key within the stale time restores its pages instead
//! of starting again from page 1.

use super::types::{SessionState, Status};
use crate::types::QueryKey;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Default freshness window
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CachedSession {
    state: SessionState,
    stored_at: Instant,
}

/// Sessions keyed by query, valid for `stale_time`
#[derive(Debug, Clone)]
pub struct SessionCache {
    stale_time: Duration,
    entries: HashMap<QueryKey, CachedSession>,
}

impl SessionCache {
    /// Create a cache with the given freshness window
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            entries: HashMap::new(),
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Keep a session for later reuse.
    ///
    /// Only sessions with at least one page and no failure are kept; an
    /// in-flight fetch is abandoned since its response will be discarded.
    pub fn store(&mut self, key: QueryKey, mut state: SessionState) {
        self.prune();
        if state.pages().is_empty() || state.status() != Status::Ready {
            return;
        }
        state.abandon_fetch();
        debug!("Caching session {key} ({} pages)", state.pages().len());
        self.entries.insert(
            key,
            CachedSession {
                state,
                stored_at: Instant::now(),
            },
        );
    }

    /// Remove and return a session if it is still fresh
    pub fn take_fresh(&mut self, key: &QueryKey) -> Option<SessionState> {
        let cached = self.entries.remove(key)?;
        if cached.stored_at.elapsed() <= self.stale_time {
            Some(cached.state)
        } else {
            debug!("Cached session {key} is stale");
            None
        }
    }

    /// Drop every stale entry
    pub fn prune(&mut self) {
        let stale_time = self.stale_time;
        self.entries
            .retain(|_, cached| cached.stored_at.elapsed() <= stale_time);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME)
    }
}
