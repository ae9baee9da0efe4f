//! In-process scroll viewport
//!
//! Models a vertical scroll container whose content ends with the sentinel.
//! Implements `ViewportObserver` by recomputing sentinel visibility whenever
//! the scroll position, the viewport or the content height changes, and
//! sending an `IntersectionEntry` each time visibility flips. Like the
//! browser observer, a freshly observed sentinel reports its initial state.

use super::observer::{IntersectionEntry, ObserverOptions, SentinelId, ViewportObserver};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::trace;

/// Visible fraction of `[target_top, target_top + target_height)` inside the
/// viewport grown by `margin` on both edges, or `None` if they do not touch.
pub fn intersection_ratio(
    viewport_top: f64,
    viewport_height: f64,
    margin: f64,
    target_top: f64,
    target_height: f64,
) -> Option<f64> {
    let root_top = viewport_top - margin;
    let root_bottom = viewport_top + viewport_height + margin;
    let target_bottom = target_top + target_height;

    let overlap = root_bottom.min(target_bottom) - root_top.max(target_top);
    if overlap < 0.0 {
        return None;
    }
    if target_height <= 0.0 {
        return Some(1.0);
    }
    Some((overlap / target_height).min(1.0))
}

/// Whether a ratio counts as intersecting for a threshold
pub fn is_intersecting(ratio: Option<f64>, threshold: f64) -> bool {
    match ratio {
        Some(r) if threshold <= 0.0 => r >= 0.0,
        Some(r) => r >= threshold,
        None => false,
    }
}

#[derive(Debug)]
struct Layout {
    viewport_height: u32,
    content_height: u32,
    sentinel_height: u32,
    scroll_top: u32,
    observed: HashMap<SentinelId, (ObserverOptions, bool)>,
}

impl Layout {
    fn max_scroll(&self) -> u32 {
        self.content_height
            .saturating_add(self.sentinel_height)
            .saturating_sub(self.viewport_height)
    }

    fn visible(&self, options: &ObserverOptions) -> bool {
        let ratio = intersection_ratio(
            f64::from(self.scroll_top),
            f64::from(self.viewport_height),
            f64::from(options.root_margin_px),
            f64::from(self.content_height),
            f64::from(self.sentinel_height),
        );
        is_intersecting(ratio, options.threshold)
    }
}

/// Scroll container with the sentinel at the end of its content
#[derive(Debug)]
pub struct ScrollViewport {
    layout: Mutex<Layout>,
    events: mpsc::UnboundedSender<IntersectionEntry>,
}

impl ScrollViewport {
    /// Create an empty viewport and the receiver of its intersection events
    pub fn new(
        viewport_height: u32,
        sentinel_height: u32,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<IntersectionEntry>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let viewport = Arc::new(Self {
            layout: Mutex::new(Layout {
                viewport_height,
                content_height: 0,
                sentinel_height,
                scroll_top: 0,
                observed: HashMap::new(),
            }),
            events,
        });
        (viewport, receiver)
    }

    fn lock(&self) -> MutexGuard<'_, Layout> {
        self.layout.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn scroll_top(&self) -> u32 {
        self.lock().scroll_top
    }

    pub fn viewport_height(&self) -> u32 {
        self.lock().viewport_height
    }

    pub fn content_height(&self) -> u32 {
        self.lock().content_height
    }

    /// Number of sentinels currently observed
    pub fn observed_count(&self) -> usize {
        self.lock().observed.len()
    }

    /// Set the height of the content above the sentinel
    pub fn set_content_height(&self, height: u32) {
        self.update(|layout| {
            layout.content_height = height;
            layout.scroll_top = layout.scroll_top.min(layout.max_scroll());
        });
    }

    /// Scroll by `delta` pixels (negative scrolls up), clamped to the content
    pub fn scroll_by(&self, delta: i64) {
        self.update(|layout| {
            let target = (i64::from(layout.scroll_top) + delta).max(0);
            let target = u32::try_from(target).unwrap_or(u32::MAX);
            layout.scroll_top = target.min(layout.max_scroll());
        });
    }

    /// Scroll to an absolute offset, clamped to the content
    pub fn scroll_to(&self, offset: u32) {
        self.update(|layout| {
            layout.scroll_top = offset.min(layout.max_scroll());
        });
    }

    /// Scroll so the sentinel is in view
    pub fn scroll_to_end(&self) {
        self.update(|layout| {
            layout.scroll_top = layout.max_scroll();
        });
    }

    /// Apply a layout change and report visibility flips
    fn update(&self, change: impl FnOnce(&mut Layout)) {
        let mut layout = self.lock();
        change(&mut layout);

        let flips: Vec<(SentinelId, bool)> = layout
            .observed
            .iter()
            .filter_map(|(id, (options, was_visible))| {
                let visible = layout.visible(options);
                (visible != *was_visible).then_some((*id, visible))
            })
            .collect();

        for (sentinel, visible) in flips {
            if let Some(entry) = layout.observed.get_mut(&sentinel) {
                entry.1 = visible;
            }
            self.emit(sentinel, visible);
        }
    }

    fn emit(&self, sentinel: SentinelId, is_intersecting: bool) {
        trace!("{sentinel} intersecting={is_intersecting}");
        // A closed receiver means nobody is listening any more
        let _ = self.events.send(IntersectionEntry {
            sentinel,
            is_intersecting,
        });
    }
}

impl ViewportObserver for ScrollViewport {
    fn observe(&self, sentinel: SentinelId, options: ObserverOptions) -> Result<()> {
        let mut layout = self.lock();
        if layout.observed.contains_key(&sentinel) {
            return Err(Error::observer(format!("{sentinel} is already observed")));
        }
        let visible = layout.visible(&options);
        layout.observed.insert(sentinel, (options, visible));
        self.emit(sentinel, visible);
        Ok(())
    }

    fn unobserve(&self, sentinel: SentinelId) {
        self.lock().observed.remove(&sentinel);
    }
}
