//! Windowed rendering and incremental pagination.
//!
//! Computes which slice of a long, fixed-extent item sequence needs to exist
//! for the current scroll position, and asks for the next page when that
//! slice approaches the end of what has been loaded. Knows nothing about
//! rendering or about how pages are fetched.

use crate::config::WindowConfig;
use serde::Serialize;

/// Half-open index range `[start, end)` of materialized items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VisibleWindow {
    pub start: usize,
    pub end: usize,
}

impl VisibleWindow {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WindowEvent {
    VisibleRangeChanged { start: usize, end: usize },
    RequestMore,
}

/// Tracks the materialized window and the single outstanding page fetch.
#[derive(Debug, Clone)]
pub struct VirtualizedWindow {
    config: WindowConfig,
    item_count: usize,
    has_more: bool,
    fetch_in_flight: bool,
    window: Option<VisibleWindow>,
}

impl VirtualizedWindow {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            item_count: 0,
            has_more: false,
            fetch_in_flight: false,
            window: None,
        }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        self.fetch_in_flight
    }

    /// Last window reported, if any recompute has happened.
    pub fn window(&self) -> Option<VisibleWindow> {
        self.window
    }

    /// Total main-axis extent of the loaded items.
    pub fn content_extent(&self) -> f64 {
        self.item_count as f64 * self.config.item_extent
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
    }

    pub fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }

    /// Forget the loaded sequence, e.g. when switching containers. An
    /// outstanding fetch is still tracked until it completes.
    pub fn reset(&mut self, has_more: bool) {
        self.item_count = 0;
        self.has_more = has_more;
        self.window = None;
    }

    /// Pure window arithmetic for the given scroll position.
    pub fn compute(&self, scroll_offset: f64, container_extent: f64) -> VisibleWindow {
        let extent = self.config.item_extent;
        let n = self.item_count;
        if n == 0 || !(extent.is_finite() && extent > 0.0) {
            return VisibleWindow::empty();
        }
        let offset = finite_non_negative(scroll_offset);
        let container = finite_non_negative(container_extent);
        let overscan = self.config.overscan as f64;

        let first = (offset / extent).floor() - overscan;
        let last = ((offset + container) / extent).ceil() + overscan;
        let start = clamp_index(first, n);
        let end = clamp_index(last, n).max(start);

        VisibleWindow { start, end }
    }

    /// Recompute the window and report what changed.
    ///
    /// Raises `RequestMore` at most once until [`complete_fetch`] or
    /// [`fail_fetch`] is called, however many times the boundary is crossed
    /// in between.
    ///
    /// [`complete_fetch`]: VirtualizedWindow::complete_fetch
    /// [`fail_fetch`]: VirtualizedWindow::fail_fetch
    pub fn recompute(&mut self, scroll_offset: f64, container_extent: f64) -> Vec<WindowEvent> {
        let window = self.compute(scroll_offset, container_extent);
        let mut events = Vec::new();

        if self.window != Some(window) {
            tracing::debug!("Visible window now [{}, {})", window.start, window.end);
            self.window = Some(window);
            events.push(WindowEvent::VisibleRangeChanged {
                start: window.start,
                end: window.end,
            });
        }

        let near_end = window.end + self.config.near_end_margin >= self.item_count;
        if near_end && self.has_more && !self.fetch_in_flight {
            tracing::debug!("Requesting next page at {} items", self.item_count);
            self.fetch_in_flight = true;
            events.push(WindowEvent::RequestMore);
        }

        events
    }

    /// The consumer finished a fetch that returned `returned` items for a
    /// request of `page_size`, of which `appended` were new. A short page
    /// means the source is exhausted, and so does a page that added nothing:
    /// asking again at the same offset would get the same page back.
    ///
    /// The consumer reports the new length separately through
    /// [`set_item_count`](VirtualizedWindow::set_item_count).
    pub fn complete_fetch(&mut self, returned: usize, appended: usize, page_size: usize) {
        self.fetch_in_flight = false;
        self.has_more = page_size > 0 && returned >= page_size && appended > 0;
        if returned > 0 && appended == 0 {
            tracing::warn!("Page of {} items held nothing new; stopping pagination", returned);
        }
        tracing::debug!("Page of {} landed; has_more={}", returned, self.has_more);
    }

    /// The consumer's fetch failed. Clears the guard without touching
    /// `has_more`, so a later recompute may retry.
    pub fn fail_fetch(&mut self) {
        self.fetch_in_flight = false;
    }
}

fn finite_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn clamp_index(value: f64, len: usize) -> usize {
    if value <= 0.0 {
        0
    } else if value >= len as f64 {
        len
    } else {
        value as usize
    }
}
