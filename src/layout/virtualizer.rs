//! Windowed materialization of long item lists.
//!
//! Only the items intersecting the viewport, plus `overscan` items on each
//! side, are materialized. With uniform item heights the window is computed
//! in O(1) from the scroll offset; with mixed heights (group headers taller
//! or shorter than rows) an [`ItemOffsets`] prefix-sum table gives an
//! O(log n) lookup instead.

use serde::Serialize;
use std::ops::Range;

use crate::config::DEFAULT_ROW_HEIGHT;

/// Contiguous range of item indices to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualWindow {
    /// First materialized index
    pub start: usize,
    /// One past the last materialized index
    pub end: usize,
    /// Y offset of the first materialized item
    pub offset_top: f32,
    /// Scrollable extent of the whole list
    pub total_height: f32,
}

impl VirtualWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Fixed-height window calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Virtualizer {
    item_height: f32,
    overscan: usize,
}

impl Virtualizer {
    /// Non-positive or non-finite heights fall back to the default row height.
    pub fn new(item_height: f32, overscan: usize) -> Self {
        let item_height = if item_height.is_finite() && item_height > 0.0 {
            item_height
        } else {
            DEFAULT_ROW_HEIGHT
        };
        Self {
            item_height,
            overscan,
        }
    }

    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Scrollable extent of `item_count` items.
    pub fn total_height(&self, item_count: usize) -> f32 {
        item_count as f32 * self.item_height
    }

    /// Upper bound on [`VirtualWindow::len`] for a viewport, whatever the
    /// item count: the fully visible items, one partially visible item at
    /// each edge, and the overscan on both sides.
    pub fn max_window_len(&self, viewport_height: f32) -> usize {
        let per_viewport = f64::from(non_negative(viewport_height)) / f64::from(self.item_height);
        to_index(per_viewport.ceil()) + 1 + 2 * self.overscan
    }

    /// Window for the given scroll position. Runs in O(1).
    pub fn window(&self, item_count: usize, scroll_top: f32, viewport_height: f32) -> VirtualWindow {
        let total_height = self.total_height(item_count);
        if item_count == 0 {
            return VirtualWindow {
                total_height,
                ..VirtualWindow::default()
            };
        }

        let top = f64::from(non_negative(scroll_top));
        let bottom = top + f64::from(non_negative(viewport_height));
        let h = f64::from(self.item_height);

        let first = to_index((top / h).floor());
        let last_exclusive = to_index((bottom / h).ceil());

        let end = last_exclusive.saturating_add(self.overscan).min(item_count);
        let start = first.saturating_sub(self.overscan).min(end);

        log::trace!("window {start}..{end} of {item_count}");
        VirtualWindow {
            start,
            end,
            offset_top: start as f32 * self.item_height,
            total_height,
        }
    }

    /// Y offset of item `index`.
    pub fn offset_of(&self, index: usize) -> f32 {
        index as f32 * self.item_height
    }
}

/// Prefix sums of item heights for mixed-height lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOffsets {
    /// `positions[i]` is the top of item `i`; the last entry is the bottom edge
    positions: Vec<f32>,
}

impl ItemOffsets {
    /// Build from item heights in list order. Negative or non-finite heights
    /// count as zero.
    pub fn from_heights(heights: impl IntoIterator<Item = f32>) -> Self {
        let heights = heights.into_iter();
        let mut positions = Vec::with_capacity(heights.size_hint().0 + 1);
        let mut y = 0.0;
        positions.push(y);
        for h in heights {
            y += non_negative(h);
            positions.push(y);
        }
        Self { positions }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_height(&self) -> f32 {
        self.positions.last().copied().unwrap_or(0.0)
    }

    /// Top of item `index`.
    pub fn offset_of(&self, index: usize) -> f32 {
        self.positions.get(index).copied().unwrap_or(0.0)
    }

    /// Height of item `index`.
    pub fn height_of(&self, index: usize) -> f32 {
        match (self.positions.get(index), self.positions.get(index + 1)) {
            (Some(top), Some(bottom)) => bottom - top,
            _ => 0.0,
        }
    }

    /// Item containing `y` (binary search), clamped to the last item.
    pub fn index_at(&self, y: f32) -> usize {
        let after = self.positions.partition_point(|pos| *pos <= y);
        after.saturating_sub(1).min(self.len().saturating_sub(1))
    }

    /// Window for the given scroll position. Runs in O(log n).
    pub fn window(&self, scroll_top: f32, viewport_height: f32, overscan: usize) -> VirtualWindow {
        let item_count = self.len();
        let total_height = self.total_height();
        if item_count == 0 {
            return VirtualWindow {
                total_height,
                ..VirtualWindow::default()
            };
        }

        let top = non_negative(scroll_top);
        let bottom = top + non_negative(viewport_height);
        let first = self.index_at(top);
        let last = self.index_at(bottom);

        let end = last
            .saturating_add(1)
            .saturating_add(overscan)
            .min(item_count);
        let start = first.saturating_sub(overscan).min(end);

        VirtualWindow {
            start,
            end,
            offset_top: self.offset_of(start),
            total_height,
        }
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Float-to-index conversion for already floored/ceiled non-negative values.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_index(v: f64) -> usize {
    if v.is_finite() && v > 0.0 {
        v as usize
    } else {
        0
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_top_of_list() {
        let v = Virtualizer::new(20.0, 2);
        let w = v.window(1000, 0.0, 100.0);
        assert_eq!(w.start, 0);
        assert_eq!(w.end, 7);
        assert_eq!(w.offset_top, 0.0);
        assert_eq!(w.total_height, 20_000.0);
    }

    #[test]
    fn test_scrolled_window_includes_overscan() {
        let v = Virtualizer::new(20.0, 2);
        let w = v.window(1000, 200.0, 100.0);
        // rows 10..15 visible, 2 extra on each side
        assert_eq!(w.range(), 8..17);
        assert_eq!(w.offset_top, 160.0);
    }

    #[test]
    fn test_end_clamped_to_count() {
        let v = Virtualizer::new(20.0, 3);
        let w = v.window(10, 150.0, 100.0);
        assert_eq!(w.end, 10);
        assert!(w.start <= w.end);
    }

    #[test]
    fn test_empty_list() {
        let v = Virtualizer::new(20.0, 3);
        let w = v.window(0, 500.0, 100.0);
        assert!(w.is_empty());
        assert_eq!(w.total_height, 0.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let v = Virtualizer::new(0.0, 1);
        assert_eq!(v.item_height(), DEFAULT_ROW_HEIGHT);
        let w = v.window(50, f32::NAN, -10.0);
        assert_eq!(w.start, 0);
        assert!(w.len() <= v.max_window_len(0.0));
    }

    #[test]
    fn test_offsets_lookup() {
        let offsets = ItemOffsets::from_heights([30.0, 20.0, 20.0, 30.0, 20.0]);
        assert_eq!(offsets.len(), 5);
        assert_eq!(offsets.total_height(), 120.0);
        assert_eq!(offsets.index_at(0.0), 0);
        assert_eq!(offsets.index_at(29.9), 0);
        assert_eq!(offsets.index_at(30.0), 1);
        assert_eq!(offsets.index_at(500.0), 4);
        assert_eq!(offsets.height_of(3), 30.0);
        assert_eq!(offsets.height_of(9), 0.0);
    }

    #[test]
    fn test_offsets_window() {
        let offsets = ItemOffsets::from_heights([30.0, 20.0, 20.0, 30.0, 20.0]);
        let w = offsets.window(35.0, 30.0, 0);
        assert_eq!(w.range(), 1..3);
        assert_eq!(w.offset_top, 30.0);
    }
}
