//! Visibility trigger module
//!
//! Turns "the sentinel below the list became visible" into "load the next
//! page".
//!
//! # Overview
//!
//! - `ViewportObserver` - platform resource that reports sentinel visibility
//! - `Observation` - scoped observation, released on drop
//! - `VisibilityTrigger` - `Idle`/`Armed` state machine calling `fetch_next`
//! - `ScrollViewport` - in-process scroll container implementing the observer

mod observer;
mod viewport;
mod visibility;

pub use observer::{
    IntersectionEntry, Observation, ObserverOptions, SentinelId, ViewportObserver,
};
pub use viewport::{intersection_ratio, is_intersecting, ScrollViewport};
pub use visibility::{IgnoreReason, TriggerOutcome, VisibilityTrigger};
