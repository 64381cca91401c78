//! Engine tuning knobs.
//!
//! Options arrive as JSON from the host page (or the CLI) and every field is
//! optional; missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Minimum width any column can be laid out or resized to, in pixels.
pub const MIN_COLUMN_WIDTH: f32 = 60.0;

/// Default data row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f32 = 36.0;

/// Default number of items materialized above and below the viewport.
pub const DEFAULT_OVERSCAN: usize = 5;

/// Default offset added to the original position of columns missing from a
/// persisted order, so they always sort after the persisted ones.
pub const DEFAULT_COLUMN_ORDER_OFFSET: usize = 10_000;

/// Grid-wide options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    /// Height of a data row in pixels
    pub row_height: f32,
    /// Height of a group header item in pixels; the row height when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_header_height: Option<f32>,
    /// Items materialized beyond each edge of the viewport
    pub overscan: usize,
    /// Initial viewport height in pixels
    pub viewport_height: f32,
    /// Initial viewport width in pixels
    pub viewport_width: f32,
    /// Header label of the canonical empty group
    pub empty_group_label: String,
    /// Footer text for aggregates with nothing to aggregate
    pub summary_placeholder: String,
    /// Sort offset for columns absent from a persisted order
    pub column_order_offset: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            group_header_height: None,
            overscan: DEFAULT_OVERSCAN,
            viewport_height: 600.0,
            viewport_width: 1200.0,
            empty_group_label: "(No value)".to_string(),
            summary_placeholder: "-".to_string(),
            column_order_offset: DEFAULT_COLUMN_ORDER_OFFSET,
        }
    }
}

impl GridOptions {
    /// Decode options from JSON and sanitize them.
    ///
    /// # Errors
    /// Returns an error if the document is not valid JSON for this shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: GridOptions = serde_json::from_str(json)?;
        Ok(options.sanitized())
    }

    /// Replace non-finite or non-positive geometry with the defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !valid_extent(self.row_height) {
            log::warn!("ignoring row height {}", self.row_height);
            self.row_height = defaults.row_height;
        }
        if let Some(height) = self.group_header_height.filter(|h| !valid_extent(*h)) {
            log::warn!("ignoring group header height {height}");
            self.group_header_height = None;
        }
        if !self.viewport_height.is_finite() || self.viewport_height < 0.0 {
            self.viewport_height = defaults.viewport_height;
        }
        if !self.viewport_width.is_finite() || self.viewport_width < 0.0 {
            self.viewport_width = defaults.viewport_width;
        }
        self
    }

    /// Height of a group header item.
    pub fn header_height(&self) -> f32 {
        self.group_header_height.unwrap_or(self.row_height)
    }

    /// Whether headers and rows share one height, allowing O(1) windowing.
    pub fn uniform_item_height(&self) -> bool {
        (self.row_height - self.header_height()).abs() < f32::EPSILON
    }
}

fn valid_extent(v: f32) -> bool {
    v.is_finite() && v > 0.0
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
    fn test_missing_keys_use_defaults() {
        let options = GridOptions::from_json(r#"{"overscan": 2}"#).unwrap();
        assert_eq!(options.overscan, 2);
        assert_eq!(options.row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(options.empty_group_label, "(No value)");
        assert!(options.uniform_item_height());
    }

    #[test]
    fn test_bad_heights_are_replaced() {
        let options =
            GridOptions::from_json(r#"{"rowHeight": -4, "groupHeaderHeight": 0}"#).unwrap();
        assert_eq!(options.row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(options.group_header_height, None);
        assert_eq!(options.header_height(), DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(GridOptions::from_json("{ not json").is_err());
    }
}
