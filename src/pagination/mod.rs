//! Pagination module
//!
//! Accumulates the pages of one query key and decides what to fetch next.
//!
//! # Overview
//!
//! Pages are numbered from 1. Each `PageRecord` carries the cursor of the
//! page after it and the total page count the catalog reported; the session
//! has a next page while fewer pages are loaded than that total. At most one
//! fetch runs per session, and changing the query key starts a new session
//! (or restores a fresh cached one).

mod cache;
mod controller;
mod types;

pub use cache::{SessionCache, DEFAULT_STALE_TIME};
pub use controller::{FetchOutcome, PaginationController, SessionSnapshot};
pub use types::{FetchKind, PageRecord, SessionState, Status};
