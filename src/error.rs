//! Error types for the movie feed
//!
//! This module defines the error hierarchy for the whole crate.
//! Public APIs return `Result<T, Error>`; the page fetcher and the search
//! recorder have their own narrower error types so callers can tell a
//! user-visible fetch failure from a swallowed analytics failure.

use thiserror::Error;

/// The main error type for the movie feed
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Fetch / Analytics Errors
    // ============================================================================
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Viewport Errors
    // ============================================================================
    #[error("Viewport observer error: {message}")]
    Observer { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an observer error
    pub fn observer(message: impl Into<String>) -> Self {
        Self::Observer {
            message: message.into(),
        }
    }
}

/// Failure of a single catalog page fetch.
///
/// Every variant is the same user-visible kind: the feed shows the message
/// inline and allows another attempt.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The catalog answered with a non-success status
    #[error("Failed to fetch movies")]
    Status { status: u16 },

    /// The request never produced a response
    #[error("Failed to fetch movies: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not a movie page
    #[error("Failed to parse movie page: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid page cursor {0}")]
    InvalidCursor(u32),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FetchError {
    /// HTTP status of the failed response, if the catalog answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Failure of the best-effort search analytics call
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Search analytics request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search analytics endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("Search count store error: {message}")]
    Store { message: String },
}

impl AnalyticsError {
    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

/// Result type alias for the movie feed
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
