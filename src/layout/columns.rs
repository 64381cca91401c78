//! Column ordering, horizontal geometry and the reorder/resize gestures.
//!
//! Columns are inputs: nothing here mutates a [`Column`]. Reorders and resizes
//! are reported as [`GridEvent`]s and the caller decides what to persist.

use std::collections::HashMap;

use super::CaptureGuard;
use crate::error::{GridError, Result};
use crate::types::{clamp_width, Column, GridEvent};

/// Visible columns in display order.
///
/// With a persisted key order, each column sorts by its index in that list;
/// columns missing from it sort by `original_position + order_offset`, so
/// columns added after the order was saved land after the saved ones.
pub fn visible_columns<'a>(
    columns: &'a [Column],
    persisted_order: Option<&[String]>,
    order_offset: usize,
) -> Vec<&'a Column> {
    let mut visible: Vec<(usize, &Column)> =
        columns.iter().enumerate().filter(|(_, c)| c.visible).collect();

    if let Some(order) = persisted_order {
        let offset = order_offset.max(order.len());
        let index_of: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, key)| (key.as_str(), i))
            .rev()
            .collect();
        visible.sort_by_key(|(position, column)| {
            index_of
                .get(column.key.as_str())
                .copied()
                .unwrap_or(position + offset)
        });
    }

    visible.into_iter().map(|(_, c)| c).collect()
}

/// Move the visible column at `from` to `to` and return the complete key
/// order: the reordered visible keys followed by hidden keys in their
/// current relative order.
///
/// # Errors
/// Returns [`GridError::InvalidMove`] if either position is out of range.
pub fn reorder_keys(
    columns: &[Column],
    visible: &[&Column],
    from: usize,
    to: usize,
) -> Result<Vec<String>> {
    let len = visible.len();
    if from >= len || to >= len {
        return Err(GridError::InvalidMove { from, to, len });
    }

    let mut keys: Vec<&str> = visible.iter().map(|c| c.key.as_str()).collect();
    let moved = keys.remove(from);
    keys.insert(to, moved);

    let hidden = columns
        .iter()
        .filter(|c| !c.visible)
        .map(|c| c.key.as_str());

    Ok(keys.into_iter().chain(hidden).map(str::to_string).collect())
}

/// Left edges of laid-out columns, plus the final right edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStrip {
    positions: Vec<f32>,
}

impl ColumnStrip {
    /// Accumulate positions from widths in display order.
    pub fn new(widths: impl IntoIterator<Item = f32>) -> Self {
        let mut positions = vec![0.0];
        let mut x = 0.0;
        for w in widths {
            x += w;
            positions.push(x);
        }
        Self { positions }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Left edge of column `index`.
    pub fn x_of(&self, index: usize) -> f32 {
        self.positions.get(index).copied().unwrap_or(0.0)
    }

    /// Total laid-out width.
    pub fn total_width(&self) -> f32 {
        self.positions.last().copied().unwrap_or(0.0)
    }

    /// Column under `x` (binary search), `None` outside the strip.
    pub fn column_at_x(&self, x: f32) -> Option<usize> {
        if self.is_empty() || !(0.0..self.total_width()).contains(&x) {
            return None;
        }
        let after = self.positions.partition_point(|pos| *pos <= x);
        Some(after.saturating_sub(1).min(self.len() - 1))
    }
}

/// Interactive state of the column header.
#[derive(Debug, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// A header is being dragged to a new position
    Dragging {
        source_index: usize,
        source_key: String,
        hover_index: Option<usize>,
        capture: CaptureGuard,
    },
    /// A header edge is being dragged to resize the column
    Resizing {
        column_id: String,
        start_x: f32,
        start_width: f32,
        preview_width: f32,
        capture: CaptureGuard,
    },
}

/// Owns the header gesture. Only one gesture runs at a time; starting a new
/// one drops the previous one along with its capture.
#[derive(Debug, Default)]
pub struct ColumnLayout {
    gesture: Gesture,
}

impl ColumnLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    /// Start dragging `source`, shown at visible position `source_index`.
    pub fn begin_drag(&mut self, source: &Column, source_index: usize, capture: CaptureGuard) {
        log::debug!("column drag of {} started at {source_index}", source.key);
        self.gesture = Gesture::Dragging {
            source_index,
            source_key: source.key.clone(),
            hover_index: None,
            capture,
        };
    }

    /// Track the drop target while dragging.
    pub fn drag_over(&mut self, index: Option<usize>) {
        if let Gesture::Dragging { hover_index, .. } = &mut self.gesture {
            *hover_index = index;
        }
    }

    /// Column being dragged, if any.
    pub fn drag_source(&self) -> Option<usize> {
        match self.gesture {
            Gesture::Dragging { source_index, .. } => Some(source_index),
            _ => None,
        }
    }

    /// Current drop target, if any.
    pub fn drop_target(&self) -> Option<usize> {
        match self.gesture {
            Gesture::Dragging { hover_index, .. } => hover_index,
            _ => None,
        }
    }

    /// Finish a drag at `destination`. Emits the new full key order if the
    /// move changed anything; the gesture ends either way. The source is
    /// located by key, so a drag never moves a column other than the one
    /// grabbed.
    pub fn end_drag(
        &mut self,
        columns: &[Column],
        visible: &[&Column],
        destination: usize,
    ) -> Option<GridEvent> {
        let Gesture::Dragging { source_key, .. } = std::mem::take(&mut self.gesture) else {
            return None;
        };
        let Some(source_index) = visible.iter().position(|c| c.key == source_key) else {
            log::warn!("discarding drag of {source_key}: column is no longer visible");
            return None;
        };
        if source_index == destination {
            log::debug!("column drag dropped in place");
            return None;
        }
        match reorder_keys(columns, visible, source_index, destination) {
            Ok(keys) => {
                log::debug!("column moved {source_index} -> {destination}");
                Some(GridEvent::ColumnOrderChanged { keys })
            }
            Err(e) => {
                log::warn!("discarding column drag: {e}");
                None
            }
        }
    }

    /// Start resizing `column` from pointer position `start_x`.
    pub fn begin_resize(&mut self, column: &Column, start_x: f32, capture: CaptureGuard) {
        let start_width = column.effective_width();
        log::debug!("resize of {} started at width {start_width}", column.id);
        self.gesture = Gesture::Resizing {
            column_id: column.id.clone(),
            start_x,
            start_width,
            preview_width: start_width,
            capture,
        };
    }

    /// Update the preview width from the pointer position. Returns the new
    /// preview width while resizing.
    pub fn resize_to(&mut self, x: f32) -> Option<f32> {
        match &mut self.gesture {
            Gesture::Resizing {
                start_x,
                start_width,
                preview_width,
                ..
            } => {
                *preview_width = clamp_width(*start_width + (x - *start_x));
                Some(*preview_width)
            }
            _ => None,
        }
    }

    /// Finish a resize. Emits the committed width if it differs from the
    /// width the gesture started with.
    pub fn end_resize(&mut self) -> Option<GridEvent> {
        if !matches!(self.gesture, Gesture::Resizing { .. }) {
            return None;
        }
        let Gesture::Resizing {
            column_id,
            start_width,
            preview_width,
            ..
        } = std::mem::take(&mut self.gesture)
        else {
            return None;
        };
        if (preview_width - start_width).abs() < f32::EPSILON {
            return None;
        }
        log::debug!("resize of {column_id} committed at {preview_width}");
        Some(GridEvent::ColumnResized {
            column_id,
            width: preview_width,
        })
    }

    /// Preview width for `column_id` while it is being resized.
    pub fn preview_width(&self, column_id: &str) -> Option<f32> {
        match &self.gesture {
            Gesture::Resizing {
                column_id: id,
                preview_width,
                ..
            } if id == column_id => Some(*preview_width),
            _ => None,
        }
    }

    /// Width to lay `column` out at: the preview while resizing it, else its
    /// own clamped width.
    pub fn width_of(&self, column: &Column) -> f32 {
        self.preview_width(&column.id)
            .unwrap_or_else(|| column.effective_width())
    }

    /// Abandon any gesture without emitting anything.
    pub fn reset(&mut self) {
        if !self.is_idle() {
            log::debug!("column gesture discarded");
        }
        self.gesture = Gesture::Idle;
    }

    /// Drop the gesture if the column set it refers to changed underneath it:
    /// the dragged column moved or vanished, or the resized column is gone.
    pub fn retain_columns(&mut self, columns: &[Column], visible: &[&Column]) {
        let stale = match &self.gesture {
            Gesture::Idle => false,
            Gesture::Dragging {
                source_index,
                source_key,
                ..
            } => visible.get(*source_index).map(|c| &c.key) != Some(source_key),
            Gesture::Resizing { column_id, .. } => !columns.iter().any(|c| &c.id == column_id),
        };
        if stale {
            self.reset();
        }
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
    use crate::types::ColumnType;

    fn cols(keys: &[&str]) -> Vec<Column> {
        keys.iter()
            .map(|k| Column::new(k, k, ColumnType::Text))
            .collect()
    }

    #[test]
    fn test_strip_positions() {
        let strip = ColumnStrip::new([100.0, 60.0, 200.0]);
        assert_eq!(strip.len(), 3);
        assert_eq!(strip.x_of(2), 160.0);
        assert_eq!(strip.total_width(), 360.0);
        assert_eq!(strip.column_at_x(0.0), Some(0));
        assert_eq!(strip.column_at_x(99.9), Some(0));
        assert_eq!(strip.column_at_x(100.0), Some(1));
        assert_eq!(strip.column_at_x(359.0), Some(2));
        assert_eq!(strip.column_at_x(360.0), None);
        assert_eq!(strip.column_at_x(-1.0), None);
    }

    #[test]
    fn test_duplicate_keys_in_persisted_order_use_first() {
        let columns = cols(&["a", "b"]);
        let order = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        let visible = visible_columns(&columns, Some(&order), 100);
        let keys: Vec<&str> = visible.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_retain_drops_stale_resize() {
        let columns = cols(&["a", "b"]);
        let mut layout = ColumnLayout::new();
        layout.begin_resize(&columns[1], 0.0, CaptureGuard::noop());
        let visible = visible_columns(&columns[..1], None, 100);
        layout.retain_columns(&columns[..1], &visible);
        assert!(layout.is_idle());
    }

    #[test]
    fn test_retain_drops_drag_when_source_moves() {
        let columns = cols(&["a", "b", "c"]);
        let mut layout = ColumnLayout::new();
        let visible = visible_columns(&columns, None, 100);
        layout.begin_drag(visible[0], 0, CaptureGuard::noop());

        layout.retain_columns(&columns, &visible);
        assert!(!layout.is_idle());

        let order = vec!["c".to_string(), "b".to_string(), "a".to_string()];
        let reordered = visible_columns(&columns, Some(&order), 100);
        layout.retain_columns(&columns, &reordered);
        assert!(layout.is_idle());
    }

    #[test]
    fn test_end_drag_locates_source_by_key() {
        let columns = cols(&["a", "b", "c"]);
        let mut layout = ColumnLayout::new();
        let visible = visible_columns(&columns, None, 100);
        layout.begin_drag(visible[0], 0, CaptureGuard::noop());

        // "a" now sits last; dropping it on its own slot changes nothing
        let order = vec!["c".to_string(), "b".to_string(), "a".to_string()];
        let reordered = visible_columns(&columns, Some(&order), 100);
        assert_eq!(layout.end_drag(&columns, &reordered, 2), None);
        assert!(layout.is_idle());
    }
}
