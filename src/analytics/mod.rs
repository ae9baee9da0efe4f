//! Search analytics module
//!
//! Records which searches users run, together with the top result they saw.
//! Recording is best-effort: the page fetcher logs and drops any failure.
//!
//! # Recorders
//!
//! - `NoopRecorder` - records nothing
//! - `SearchCountStore` - per-term counters in a JSON file, with a trending view
//! - `WebhookRecorder` - POSTs each search to an HTTP endpoint

mod counter;
mod recorder;
mod webhook;

pub use counter::{poster_url, SearchCount, SearchCountStore, POSTER_BASE_URL};
pub use recorder::{recorder_from_config, NoopRecorder, SearchRecorder};
pub use webhook::{SearchEvent, WebhookRecorder};
