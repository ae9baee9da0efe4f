//! Configuration for the movie feed
//!
//! All settings can be loaded from a YAML file. Every field has a default
//! except the catalog API key, which usually comes from the `TMDB_API_KEY`
//! environment variable.

use crate::catalog::AnalyticsDispatch;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the catalog API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Environment variable overriding the catalog base URL
pub const BASE_URL_ENV: &str = "TMDB_BASE_URL";

/// Default catalog base URL
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete feed configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Catalog API settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Pagination session settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Sentinel observation settings
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Where search analytics go
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Whether the fetcher waits for the analytics call
    #[serde(default)]
    pub analytics_dispatch: AnalyticsDispatch,
}

impl FeedConfig {
    /// Parse config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Apply environment overrides
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    #[must_use]
    pub fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.catalog.api_key = Some(key);
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.is_empty()) {
            self.catalog.base_url = url;
        }
        self
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self
            .catalog
            .api_key
            .as_deref()
            .map_or(true, |k| k.trim().is_empty())
        {
            return Err(Error::missing_field("catalog.api_key"));
        }

        url::Url::parse(&self.catalog.base_url)
            .map_err(|e| Error::invalid_value("catalog.base_url", e.to_string()))?;

        if !(0.0..=1.0).contains(&self.observer.threshold) {
            return Err(Error::invalid_value(
                "observer.threshold",
                "must be between 0 and 1",
            ));
        }

        if let Some(limit) = &self.catalog.rate_limit {
            if limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "catalog.rate_limit.requests_per_second",
                    "must be greater than 0",
                ));
            }
        }

        Ok(())
    }

    /// Copy of this config safe to print
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.catalog.api_key.is_some() {
            config.catalog.api_key = Some("****".to_string());
        }
        config
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Catalog API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the catalog
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional client-side request pacing
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            rate_limit: None,
        }
    }
}

impl CatalogConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Rate limit settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second
    pub requests_per_second: u32,

    /// Burst size
    #[serde(default)]
    pub burst: Option<u32>,
}

// ============================================================================
// Session
// ============================================================================

/// Pagination session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long a left-behind session may be reused without refetching
    #[serde(default = "default_stale_time_secs")]
    pub stale_time_secs: u64,
}

fn default_stale_time_secs() -> u64 {
    300
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stale_time_secs: default_stale_time_secs(),
        }
    }
}

impl SessionConfig {
    /// Freshness window for cached sessions
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }
}

// ============================================================================
// Observer
// ============================================================================

/// Sentinel observation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// Margin around the viewport that still counts as visible, in pixels
    #[serde(default = "default_root_margin_px")]
    pub root_margin_px: u32,

    /// Fraction of the sentinel that must be visible (0 = any overlap)
    #[serde(default)]
    pub threshold: f64,
}

fn default_root_margin_px() -> u32 {
    20
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            root_margin_px: default_root_margin_px(),
            threshold: 0.0,
        }
    }
}

// ============================================================================
// Analytics
// ============================================================================

/// Search analytics destination
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalyticsConfig {
    /// Do not record searches
    #[default]
    None,

    /// Count searches in a local JSON file
    File { path: PathBuf },

    /// POST each search to a URL
    Webhook { url: String },
}
