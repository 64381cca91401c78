use serde::{Deserialize, Serialize};

use crate::config::MIN_COLUMN_WIDTH;

/// Kind of data a column holds. Drives rendering, editability and icons.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Currency,
    Email,
    Phone,
    #[serde(alias = "url")]
    Link,
    Person,
    Company,
    Date,
    Checkbox,
    Dropdown,
    Tags,
    Formula,
    Integration,
    Action,
}

impl ColumnType {
    /// Whether values of this type can be edited inline at all.
    ///
    /// Formula values are computed and action/integration cells are buttons.
    pub fn is_user_editable(self) -> bool {
        !matches!(self, Self::Formula | Self::Action | Self::Integration)
    }

    /// Whether values of this type are numbers for display purposes.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Currency)
    }
}

/// One column of the grid.
///
/// `key` is the stable identity used by grouping, formatting, aggregation
/// and persisted ordering; `id` is the store's identifier and is only echoed
/// back in events that the store needs to address the column.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub key: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    /// Populated asynchronously by an enrichment job
    #[serde(default)]
    pub is_enrichment: bool,
    /// Width in pixels; clamped to `MIN_COLUMN_WIDTH` on use
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Allowed values for dropdown columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Expression for formula columns (evaluated by the data layer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

fn default_width() -> f32 {
    150.0
}

fn default_visible() -> bool {
    true
}

impl Column {
    /// Create a visible column with the default width.
    pub fn new(key: &str, label: &str, column_type: ColumnType) -> Self {
        Self {
            id: key.to_string(),
            key: key.to_string(),
            label: label.to_string(),
            column_type,
            is_enrichment: false,
            width: default_width(),
            visible: true,
            options: None,
            formula: None,
        }
    }

    /// Width after clamping to the minimum column width.
    pub fn effective_width(&self) -> f32 {
        clamp_width(self.width)
    }
}

/// Clamp a requested width to the minimum column width. Non-finite input
/// yields the minimum.
pub fn clamp_width(width: f32) -> f32 {
    if width.is_finite() {
        width.max(MIN_COLUMN_WIDTH)
    } else {
        MIN_COLUMN_WIDTH
    }
}
