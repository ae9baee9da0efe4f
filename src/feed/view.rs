//! Feed view states and their text rendering

use crate::pagination::{SessionSnapshot, Status};
use crate::types::Movie;
use std::fmt::Write as _;

/// Heading above the list
pub const FEED_TITLE: &str = "All Movies";

/// Caption under the list while more pages exist
pub const MORE_AVAILABLE_CAPTION: &str = "Loading more movies...";

/// Caption under the list once everything is loaded
pub const EXHAUSTED_CAPTION: &str = "No more movies to load.";

/// Spinner stand-in for text output
pub const SPINNER: &str = "[loading]";

/// What the sentinel area under the list shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Footer {
    /// A later page is loading
    FetchingMore,
    /// More pages exist; scrolling further loads them
    MoreAvailable,
    /// Every page is loaded
    Exhausted,
    /// Loading a later page failed; scrolling retries
    Failed { message: String },
}

impl Footer {
    pub fn caption(&self) -> &str {
        match self {
            Self::FetchingMore => SPINNER,
            Self::MoreAvailable => MORE_AVAILABLE_CAPTION,
            Self::Exhausted => EXHAUSTED_CAPTION,
            Self::Failed { message } => message,
        }
    }
}

/// The three mutually exclusive feed states
#[derive(Debug, Clone, PartialEq)]
pub enum FeedView {
    /// First page not loaded yet
    Loading,
    /// First page failed
    Error { message: String },
    /// At least one page loaded
    List { items: Vec<Movie>, footer: Footer },
}

impl FeedView {
    /// Derive the view from a session snapshot
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        if snapshot.page_count == 0 {
            return match snapshot.status {
                Status::Failed => Self::Error {
                    message: snapshot
                        .error_message
                        .unwrap_or_else(|| "Failed to fetch movies".to_string()),
                },
                Status::Pending | Status::Ready => Self::Loading,
            };
        }

        let footer = if snapshot.is_fetching_next {
            Footer::FetchingMore
        } else if snapshot.status == Status::Failed {
            Footer::Failed {
                message: snapshot.error_message.unwrap_or_default(),
            }
        } else if snapshot.has_next_page {
            Footer::MoreAvailable
        } else {
            Footer::Exhausted
        };

        Self::List {
            items: snapshot.items,
            footer,
        }
    }

    /// Whether the sentinel element is rendered
    pub fn shows_sentinel(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    /// Render the whole view as text
    pub fn render(&self) -> String {
        let mut out = format!("{FEED_TITLE}\n");
        match self {
            Self::Loading => out.push_str(SPINNER),
            Self::Error { message } => out.push_str(message),
            Self::List { items, footer } => {
                for movie in items {
                    let _ = writeln!(out, "{}", render_card(movie));
                }
                out.push_str(footer.caption());
            }
        }
        out.push('\n');
        out
    }
}

/// One-line movie card: title, year, rating, language
pub fn render_card(movie: &Movie) -> String {
    let mut card = movie.display_title();
    if let Some(year) = movie.release_year() {
        let _ = write!(card, " ({year})");
    }
    match movie.vote_average {
        Some(vote) if vote > 0.0 => {
            let _ = write!(card, " * {vote:.1}");
        }
        _ => card.push_str(" * N/A"),
    }
    if let Some(lang) = &movie.original_language {
        let _ = write!(card, " | {lang}");
    }
    card
}
