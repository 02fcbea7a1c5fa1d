//! Keeps a selected item on screen.
//!
//! When selection moves to an item outside the viewport, scroll just far
//! enough to show it plus a slice of its neighbor, hinting that more items
//! lie in that direction.

/// Geometry of the scroll surface at the moment selection changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: f64,
    pub container_extent: f64,
    pub max_scroll: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionScrollPlanner {
    item_extent: f64,
    peek_offset: f64,
}

impl SelectionScrollPlanner {
    pub fn new(item_extent: f64, peek_offset: f64) -> Self {
        Self {
            item_extent,
            peek_offset,
        }
    }

    pub fn item_extent(&self) -> f64 {
        self.item_extent
    }

    pub fn peek_offset(&self) -> f64 {
        self.peek_offset
    }

    /// Target offset that reveals the item at `index`, or `None` when it is
    /// already fully visible.
    pub fn plan(&self, index: usize, viewport: Viewport) -> Option<f64> {
        self.plan_for_start(index as f64 * self.item_extent, viewport)
    }

    /// Same as [`plan`](Self::plan) for an item beginning at `item_start`.
    pub fn plan_for_start(&self, item_start: f64, viewport: Viewport) -> Option<f64> {
        let visible_start = viewport.offset;
        let visible_end = viewport.offset + viewport.container_extent;
        let item_end = item_start + self.item_extent;

        let target = if item_end > visible_end {
            item_end - viewport.container_extent + self.peek_offset
        } else if item_start < visible_start {
            item_start - self.peek_offset
        } else {
            return None;
        };

        let max = if viewport.max_scroll.is_finite() && viewport.max_scroll > 0.0 {
            viewport.max_scroll
        } else {
            0.0
        };
        if !target.is_finite() {
            return Some(0.0);
        }
        Some(target.clamp(0.0, max))
    }
}
