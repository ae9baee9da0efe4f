//! CLI module
//!
//! Command-line interface for browsing the movie feed.
//!
//! # Commands
//!
//! - `browse` - Scroll the feed, search, retry
//! - `trending` - Most frequent searches from the file store
//! - `config` - Print the effective configuration

mod browser;
mod commands;
mod runner;

pub use browser::{Browser, Input, ROW_HEIGHT, VIEWPORT_ROWS};
pub use commands::{Cli, Commands};
pub use runner::Runner;
