//! Viewport observation resource
//!
//! `ViewportObserver` is the platform side: something that can watch a
//! sentinel element and report when it enters or leaves the viewport.
//! `Observation` is the scoped handle for one watched sentinel; dropping it
//! stops the observation.

use crate::config::ObserverConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Identifies a sentinel element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SentinelId(pub u64);

impl fmt::Display for SentinelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sentinel#{}", self.0)
    }
}

/// How a sentinel is observed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Growth of the viewport on every side, in pixels
    pub root_margin_px: u32,
    /// Visible fraction of the sentinel needed to count as intersecting
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin_px: 20,
            threshold: 0.0,
        }
    }
}

impl From<&ObserverConfig> for ObserverOptions {
    fn from(config: &ObserverConfig) -> Self {
        Self {
            root_margin_px: config.root_margin_px,
            threshold: config.threshold,
        }
    }
}

/// Intersection change reported for a sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub sentinel: SentinelId,
    pub is_intersecting: bool,
}

/// Platform resource that watches sentinels
pub trait ViewportObserver: Send + Sync {
    /// Start reporting intersections of `sentinel`
    fn observe(&self, sentinel: SentinelId, options: ObserverOptions) -> Result<()>;

    /// Stop reporting intersections of `sentinel`
    fn unobserve(&self, sentinel: SentinelId);
}

/// An active observation; unobserves on drop
pub struct Observation {
    observer: Arc<dyn ViewportObserver>,
    sentinel: SentinelId,
}

impl Observation {
    /// Begin observing `sentinel`
    pub fn start(
        observer: Arc<dyn ViewportObserver>,
        sentinel: SentinelId,
        options: ObserverOptions,
    ) -> Result<Self> {
        observer.observe(sentinel, options)?;
        debug!("Observing {sentinel}");
        Ok(Self { observer, sentinel })
    }

    pub fn sentinel(&self) -> SentinelId {
        self.sentinel
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.observer.unobserve(self.sentinel);
        debug!("Stopped observing {}", self.sentinel);
    }
}

impl fmt::Debug for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observation")
            .field("sentinel", &self.sentinel)
            .finish_non_exhaustive()
    }
}
