//! The movie feed component
//!
//! Owns a pagination controller and the visibility trigger of its sentinel.
//! After every action the sentinel is armed or disarmed to match the view:
//! it exists only while the list is shown.

use super::view::FeedView;
use crate::error::Result;
use crate::pagination::{FetchOutcome, PaginationController};
use crate::trigger::{
    IntersectionEntry, ObserverOptions, SentinelId, TriggerOutcome, ViewportObserver,
    VisibilityTrigger,
};
use std::sync::Arc;

/// Infinite-scroll movie list
#[derive(Debug)]
pub struct MovieFeed {
    controller: PaginationController,
    trigger: VisibilityTrigger,
    sentinel: SentinelId,
}

impl MovieFeed {
    /// Create an unmounted feed
    pub fn new(
        controller: PaginationController,
        observer: Arc<dyn ViewportObserver>,
        options: ObserverOptions,
        sentinel: SentinelId,
    ) -> Self {
        Self {
            controller,
            trigger: VisibilityTrigger::new(observer, options),
            sentinel,
        }
    }

    pub fn controller(&self) -> &PaginationController {
        &self.controller
    }

    /// Whether the sentinel is currently observed
    pub fn is_observing(&self) -> bool {
        self.trigger.is_armed()
    }

    /// Load the first page of the current query
    pub async fn mount(&mut self) -> Result<FetchOutcome> {
        let outcome = self.controller.start().await;
        self.sync_sentinel()?;
        Ok(outcome)
    }

    /// Change the search term; blank means "discover popular"
    pub async fn set_search_term(&mut self, term: Option<&str>) -> Result<FetchOutcome> {
        // The list is replaced, so the old sentinel goes away first
        self.trigger.disarm();
        let outcome = self.controller.set_search_term(term).await;
        self.sync_sentinel()?;
        Ok(outcome)
    }

    /// Forward an intersection change of the sentinel
    pub async fn on_intersect(&mut self, entry: IntersectionEntry) -> Result<TriggerOutcome> {
        let outcome = self.trigger.on_intersect(entry, &self.controller).await;
        self.sync_sentinel()?;
        Ok(outcome)
    }

    /// Try the failed (or next) page again
    pub async fn retry(&mut self) -> Result<FetchOutcome> {
        let outcome = self.controller.fetch_next().await;
        self.sync_sentinel()?;
        Ok(outcome)
    }

    /// Current view
    pub fn view(&self) -> FeedView {
        FeedView::from_snapshot(self.controller.snapshot())
    }

    /// Stop observing the sentinel
    pub fn unmount(&mut self) {
        self.trigger.disarm();
    }

    fn sync_sentinel(&mut self) -> Result<()> {
        let shown = self.view().shows_sentinel();
        match (shown, self.trigger.is_armed()) {
            (true, false) => self.trigger.arm(self.sentinel)?,
            (false, true) => self.trigger.disarm(),
            _ => {}
        }
        Ok(())
    }
}
