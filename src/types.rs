//! Common types used throughout the movie feed
//!
//! This module contains the catalog record type and the query key that
//! identifies a pagination session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Collection name every query key belongs to
pub const MOVIES_COLLECTION: &str = "movies";

// ============================================================================
// Movie
// ============================================================================

/// A catalog movie record.
///
/// Only `id` is required. The display fields the feed renders are typed;
/// a missing or `null` display field reads as `None` and is left out when
/// serialized. Everything else the catalog sends is kept in `extra` and
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Catalog id, unique within a result set
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,

    /// Path fragment of the poster image, relative to the image CDN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,

    /// Remaining catalog fields
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Movie {
    /// Create a movie with only an id and a title
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            release_date: None,
            vote_average: None,
            original_language: None,
            poster_path: None,
            extra: JsonObject::new(),
        }
    }

    /// Title to display, falling back to the id
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Movie #{}", self.id))
    }

    /// Release year parsed from `release_date` (`YYYY-MM-DD`)
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
    }
}

// ============================================================================
// Query Key
// ============================================================================

/// Identity of a pagination session.
///
/// Two keys are equal when they would produce the same request sequence, so
/// an empty or whitespace-only search term is normalized to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    pub collection: String,
    pub search_term: Option<String>,
}

impl QueryKey {
    /// Key for the given search term; blank terms mean "discover popular"
    pub fn new(search_term: Option<&str>) -> Self {
        let search_term = search_term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string);
        Self {
            collection: MOVIES_COLLECTION.to_string(),
            search_term,
        }
    }

    /// Key for the popular listing
    pub fn discover() -> Self {
        Self::new(None)
    }

    /// Key for a search
    pub fn search(term: impl AsRef<str>) -> Self {
        Self::new(Some(term.as_ref()))
    }

    /// Search term, if this key is a search
    pub fn term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }
}

impl Default for QueryKey {
    fn default() -> Self {
        Self::discover()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.search_term {
            Some(term) => write!(f, "{}[search={term}]", self.collection),
            None => write!(f, "{}[discover]", self.collection),
        }
    }
}
