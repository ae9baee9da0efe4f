//! Visibility trigger
//!
//! Loads the next page when the sentinel below the list becomes visible.

use super::observer::{
    IntersectionEntry, Observation, ObserverOptions, SentinelId, ViewportObserver,
};
use crate::error::Result;
use crate::pagination::{FetchOutcome, PaginationController};
use std::sync::Arc;
use tracing::debug;

/// Why an intersection did not load a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No sentinel is observed
    NotArmed,
    /// The entry is for a sentinel this trigger does not own
    OtherSentinel,
    /// The sentinel left the viewport
    NotVisible,
    /// Every page is loaded
    NoNextPage,
    /// A page fetch is already running
    AlreadyFetching,
}

/// What an intersection led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Fetched(FetchOutcome),
    Ignored(IgnoreReason),
}

#[derive(Debug, Default)]
enum TriggerState {
    #[default]
    Idle,
    Armed(Observation),
}

/// Two-state trigger: `Idle` or `Armed` with a live observation
pub struct VisibilityTrigger {
    observer: Arc<dyn ViewportObserver>,
    options: ObserverOptions,
    state: TriggerState,
}

impl VisibilityTrigger {
    /// Create an idle trigger
    pub fn new(observer: Arc<dyn ViewportObserver>, options: ObserverOptions) -> Self {
        Self {
            observer,
            options,
            state: TriggerState::Idle,
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, TriggerState::Armed(_))
    }

    /// Observed sentinel, if armed
    pub fn sentinel(&self) -> Option<SentinelId> {
        match &self.state {
            TriggerState::Armed(observation) => Some(observation.sentinel()),
            TriggerState::Idle => None,
        }
    }

    /// Start observing `sentinel`, releasing any previous observation first
    pub fn arm(&mut self, sentinel: SentinelId) -> Result<()> {
        self.disarm();
        let observation = Observation::start(Arc::clone(&self.observer), sentinel, self.options)?;
        self.state = TriggerState::Armed(observation);
        Ok(())
    }

    /// Stop observing; no-op when idle
    pub fn disarm(&mut self) {
        // Dropping the observation unobserves
        self.state = TriggerState::Idle;
    }

    /// Handle an intersection change for the observed sentinel
    pub async fn on_intersect(
        &self,
        entry: IntersectionEntry,
        controller: &PaginationController,
    ) -> TriggerOutcome {
        let Some(sentinel) = self.sentinel() else {
            return TriggerOutcome::Ignored(IgnoreReason::NotArmed);
        };
        if entry.sentinel != sentinel {
            return TriggerOutcome::Ignored(IgnoreReason::OtherSentinel);
        }
        if !entry.is_intersecting {
            return TriggerOutcome::Ignored(IgnoreReason::NotVisible);
        }
        if !controller.has_next_page() {
            return TriggerOutcome::Ignored(IgnoreReason::NoNextPage);
        }
        if controller.is_fetching_next() {
            return TriggerOutcome::Ignored(IgnoreReason::AlreadyFetching);
        }

        debug!("{sentinel} visible, loading next page");
        TriggerOutcome::Fetched(controller.fetch_next().await)
    }
}

impl std::fmt::Debug for VisibilityTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityTrigger")
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
