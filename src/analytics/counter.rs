//! Per-term search counters
//!
//! One `SearchCount` per distinct search term. The first time a term is
//! recorded it is stored with the top result's id and poster; later
//! searches only bump the count. Counters persist to a JSON file with
//! atomic writes.

use super::recorder::SearchRecorder;
use crate::error::{AnalyticsError, Result};
use crate::types::Movie;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Image CDN prefix for poster paths
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Full poster URL for a movie, if it has a poster
pub fn poster_url(movie: &Movie) -> Option<String> {
    movie
        .poster_path
        .as_deref()
        .map(|path| format!("{POSTER_BASE_URL}{path}"))
}

/// Counter for one search term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCount {
    pub search_term: String,
    pub count: u64,
    /// Id of the top result the first time the term was searched
    pub movie_id: u64,
    #[serde(default)]
    pub poster_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Search counters, optionally backed by a JSON file
#[derive(Debug, Clone)]
pub struct SearchCountStore {
    /// Backing file; `None` keeps counters in memory only
    path: Option<PathBuf>,
    counts: Arc<RwLock<Vec<SearchCount>>>,
}

impl SearchCountStore {
    /// Create a store that never touches disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            counts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Open a file-backed store, loading existing counters if present
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let exists = tokio::fs::try_exists(&path).await.map_err(|e| {
            AnalyticsError::store(format!("Failed to check {}: {e}", path.display()))
        })?;
        let counts: Vec<SearchCount> = if exists {
            let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
                AnalyticsError::store(format!("Failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str(&contents).map_err(|e| {
                AnalyticsError::store(format!("Failed to parse {}: {e}", path.display()))
            })?
        } else {
            Vec::new()
        };

        Ok(Self {
            path: Some(path),
            counts: Arc::new(RwLock::new(counts)),
        })
    }

    /// Record a search, creating or incrementing its counter
    pub async fn increment(
        &self,
        search_term: &str,
        movie: &Movie,
    ) -> std::result::Result<SearchCount, AnalyticsError> {
        let mut counts = self.counts.write().await;
        let now = Utc::now();

        let updated = if let Some(existing) = counts.iter_mut().find(|c| c.search_term == search_term)
        {
            existing.count += 1;
            existing.updated_at = now;
            existing.clone()
        } else {
            let created = SearchCount {
                search_term: search_term.to_string(),
                count: 1,
                movie_id: movie.id,
                poster_url: poster_url(movie),
                updated_at: now,
            };
            counts.push(created.clone());
            created
        };

        debug!(
            "Search '{}' recorded, count={}",
            updated.search_term, updated.count
        );

        if let Some(ref path) = self.path {
            persist(path, &counts).await?;
        }

        Ok(updated)
    }

    /// Counter for a term
    pub async fn get(&self, search_term: &str) -> Option<SearchCount> {
        self.counts
            .read()
            .await
            .iter()
            .find(|c| c.search_term == search_term)
            .cloned()
    }

    /// Most searched terms, highest count first
    pub async fn trending(&self, limit: usize) -> Vec<SearchCount> {
        let mut counts = self.counts.read().await.clone();
        counts.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        counts.truncate(limit);
        counts
    }

    /// Number of distinct terms
    pub async fn len(&self) -> usize {
        self.counts.read().await.len()
    }

    /// Whether no search has been recorded
    pub async fn is_empty(&self) -> bool {
        self.counts.read().await.is_empty()
    }
}

#[async_trait]
impl SearchRecorder for SearchCountStore {
    async fn record(
        &self,
        search_term: &str,
        movie: &Movie,
    ) -> std::result::Result<(), AnalyticsError> {
        self.increment(search_term, movie).await.map(|_| ())
    }
}

/// Write counters to a temp file, then rename over the target
async fn persist(path: &Path, counts: &[SearchCount]) -> std::result::Result<(), AnalyticsError> {
    let contents = serde_json::to_string_pretty(counts)
        .map_err(|e| AnalyticsError::store(format!("Failed to serialize counters: {e}")))?;

    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, &contents)
        .await
        .map_err(|e| AnalyticsError::store(format!("Failed to write counters: {e}")))?;
    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| AnalyticsError::store(format!("Failed to rename counters file: {e}")))?;

    Ok(())
}
