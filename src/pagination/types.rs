//! Pagination types
//!
//! Defines the page record produced by each fetch and the session state the
//! controller accumulates from them.

use crate::types::Movie;
use serde::{Deserialize, Serialize};

/// One fetched page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Movies in catalog order
    pub items: Vec<Movie>,
    /// Cursor of the page after this one
    pub next_cursor: u32,
    /// Number of pages the catalog reports for the query
    pub total_pages: u32,
}

impl PageRecord {
    /// Create a page record
    pub fn new(items: Vec<Movie>, next_cursor: u32, total_pages: u32) -> Self {
        Self {
            items,
            next_cursor,
            total_pages,
        }
    }
}

/// Last known status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// No page has resolved yet
    #[default]
    Pending,
    /// The most recent fetch succeeded
    Ready,
    /// The most recent fetch failed
    Failed,
}

/// Which fetch is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page of the session
    Initial,
    /// Any later page
    Next,
}

/// Pages and status of one query key.
///
/// `pages.len()` never exceeds the total page count reported by the last
/// page, and nothing is fetched once it is reached.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pages: Vec<PageRecord>,
    status: Status,
    in_flight: Option<FetchKind>,
    error_message: Option<String>,
}

impl SessionState {
    /// Create an empty, pending session
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetched pages in fetch order
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    /// All fetched movies, in page order
    pub fn items(&self) -> impl Iterator<Item = &Movie> {
        self.pages.iter().flat_map(|p| p.items.iter())
    }

    /// Number of fetched movies
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|p| p.items.len()).sum()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// True iff fewer pages are loaded than the last page reported
    pub fn has_next_page(&self) -> bool {
        self.pages
            .last()
            .is_some_and(|last| (self.pages.len() as u64) < u64::from(last.total_pages))
    }

    /// True while a fetch of any page is in flight
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True while a non-initial page fetch is in flight
    pub fn is_fetching_next(&self) -> bool {
        self.in_flight == Some(FetchKind::Next)
    }

    /// Cursor of the page to fetch next.
    ///
    /// An empty session starts (or retries) at page 1.
    pub fn next_cursor(&self) -> Option<u32> {
        match self.pages.last() {
            None => Some(1),
            Some(last) if self.has_next_page() => Some(last.next_cursor),
            Some(_) => None,
        }
    }

    /// Whether every available page has been fetched
    pub fn is_complete(&self) -> bool {
        !self.pages.is_empty() && !self.has_next_page()
    }

    /// Mark a fetch as started
    pub fn begin_fetch(&mut self) -> FetchKind {
        let kind = if self.pages.is_empty() {
            FetchKind::Initial
        } else {
            FetchKind::Next
        };
        self.in_flight = Some(kind);
        kind
    }

    /// Append a fetched page
    pub fn push_page(&mut self, page: PageRecord) {
        self.in_flight = None;
        self.status = Status::Ready;
        self.error_message = None;
        self.pages.push(page);
    }

    /// Record a failed fetch; pages already loaded are kept
    pub fn fail(&mut self, message: impl Into<String>) {
        self.in_flight = None;
        self.status = Status::Failed;
        self.error_message = Some(message.into());
    }

    /// Drop the in-flight marker without touching pages or status
    pub fn abandon_fetch(&mut self) {
        self.in_flight = None;
    }
}
