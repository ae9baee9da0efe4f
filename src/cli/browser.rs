//! Terminal browsing session
//!
//! Drives a `MovieFeed` through a `ScrollViewport`: the viewport's height is
//! kept in step with the number of rendered cards and its intersection
//! events are forwarded to the feed.

use crate::error::Result;
use crate::feed::{render_card, FeedView, MovieFeed, FEED_TITLE, SPINNER};
use crate::pagination::Status;
use crate::trigger::{IntersectionEntry, ScrollViewport, TriggerOutcome};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Height of one movie card, in pixels
pub const ROW_HEIGHT: u32 = 24;

/// Cards visible at once
pub const VIEWPORT_ROWS: u32 = 20;

/// Interactive input, one line each
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Scroll down one viewport
    Scroll,
    /// Replace the search term; `None` shows popular movies
    Search(Option<String>),
    Retry,
    Quit,
}

impl Input {
    /// Parse a line typed at the prompt
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if let Some(term) = line.strip_prefix('/') {
            let term = term.trim();
            return Self::Search((!term.is_empty()).then(|| term.to_string()));
        }
        match line {
            "q" | "quit" => Self::Quit,
            "r" | "retry" => Self::Retry,
            _ => Self::Scroll,
        }
    }
}

/// A mounted feed inside a scroll viewport
pub struct Browser {
    feed: MovieFeed,
    viewport: Arc<ScrollViewport>,
    events: mpsc::UnboundedReceiver<IntersectionEntry>,
    shown: usize,
    out: Vec<String>,
}

impl Browser {
    pub fn new(
        feed: MovieFeed,
        viewport: Arc<ScrollViewport>,
        events: mpsc::UnboundedReceiver<IntersectionEntry>,
    ) -> Self {
        Self {
            feed,
            viewport,
            events,
            shown: 0,
            out: Vec::new(),
        }
    }

    pub fn feed(&self) -> &MovieFeed {
        &self.feed
    }

    /// Load the first page and lay it out
    pub async fn mount(&mut self) -> Result<()> {
        self.out.push(FEED_TITLE.to_string());
        self.feed.mount().await?;
        self.settle().await
    }

    /// Apply one input; returns `false` on quit
    pub async fn handle(&mut self, input: Input) -> Result<bool> {
        match input {
            Input::Scroll => self.scroll().await?,
            Input::Search(term) => self.search(term.as_deref()).await?,
            Input::Retry => {
                self.feed.retry().await?;
                self.settle().await?;
            }
            Input::Quit => {
                self.feed.unmount();
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Scroll down one viewport
    pub async fn scroll(&mut self) -> Result<()> {
        let before = (self.viewport.scroll_top(), self.feed.controller().page_count());
        self.viewport.scroll_by(i64::from(self.viewport.viewport_height()));
        self.settle().await?;

        // Already at the bottom with the sentinel in view: no visibility
        // change will come, so ask for the next page (or the failed one) directly
        let after = (self.viewport.scroll_top(), self.feed.controller().page_count());
        if before == after
            && self.feed.is_observing()
            && self.feed.controller().has_next_page()
        {
            self.feed.retry().await?;
            self.settle().await?;
        }
        Ok(())
    }

    /// Scroll until `pages` pages are loaded or the feed runs out
    pub async fn scroll_pages(&mut self, pages: usize) -> Result<()> {
        loop {
            let controller = self.feed.controller();
            if controller.page_count() >= pages
                || controller.status() == Status::Failed
                || !controller.has_next_page()
            {
                return Ok(());
            }
            self.scroll().await?;
        }
    }

    /// Replace the search term and start from the top
    pub async fn search(&mut self, term: Option<&str>) -> Result<()> {
        self.viewport.scroll_to(0);
        self.feed.set_search_term(term).await?;
        self.shown = 0;
        self.out.push(FEED_TITLE.to_string());
        self.settle().await
    }

    /// Lines rendered since the last call
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.out)
    }

    /// Re-layout, forward visibility changes until none are pending, then
    /// render what changed
    async fn settle(&mut self) -> Result<()> {
        loop {
            self.layout();
            // Only the latest state of the sentinel matters
            let mut latest = None;
            while let Ok(entry) = self.events.try_recv() {
                latest = Some(entry);
            }
            let Some(entry) = latest else { break };
            let outcome = self.feed.on_intersect(entry).await?;
            debug!("Intersection {entry:?} -> {outcome:?}");
            if !matches!(outcome, TriggerOutcome::Fetched(_)) {
                break;
            }
        }
        self.render();
        Ok(())
    }

    fn layout(&self) {
        let rows = u32::try_from(self.feed.controller().current_items().len()).unwrap_or(u32::MAX);
        self.viewport.set_content_height(rows.saturating_mul(ROW_HEIGHT));
    }

    fn render(&mut self) {
        match self.feed.view() {
            FeedView::Loading => self.out.push(SPINNER.to_string()),
            FeedView::Error { message } => {
                self.out.push(format!("{message} (r to retry)"));
            }
            FeedView::List { items, footer } => {
                for movie in items.iter().skip(self.shown) {
                    self.out.push(render_card(movie));
                }
                self.shown = items.len();
                self.out.push(format!("-- {} --", footer.caption()));
            }
        }
    }
}

impl std::fmt::Debug for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Browser")
            .field("feed", &self.feed)
            .field("shown", &self.shown)
            .finish_non_exhaustive()
    }
}
