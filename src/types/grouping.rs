use serde::{Deserialize, Serialize};

use super::Row;

/// How group headers are ordered.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroupSort {
    /// Alphabetical by group value, empty group last
    #[default]
    Alpha,
    /// Largest group first
    Count,
}

/// Single-level grouping of rows by one column's value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GroupConfig {
    #[serde(alias = "columnKey")]
    pub column_key: String,
    #[serde(default, alias = "collapsedByDefault")]
    pub collapsed_by_default: bool,
    #[serde(default, alias = "sortGroupsBy")]
    pub sort_groups_by: GroupSort,
}

impl GroupConfig {
    /// Group by `column_key`, expanded, alphabetical.
    pub fn new(column_key: &str) -> Self {
        Self {
            column_key: column_key.to_string(),
            collapsed_by_default: false,
            sort_groups_by: GroupSort::Alpha,
        }
    }
}

/// Synthetic entry for one distinct group value.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupHeader {
    /// Group value; the canonical empty group uses an empty key
    pub group_key: String,
    /// Text shown in the header
    pub label: String,
    /// Number of member rows, whether or not they are shown
    pub count: usize,
    pub collapsed: bool,
}

/// One entry of the flattened grid sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum GridItem<'a> {
    Header(GroupHeader),
    Row(&'a Row),
}

impl GridItem<'_> {
    /// True for group headers.
    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header(_))
    }
}
