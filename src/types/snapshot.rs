use serde::{Deserialize, Serialize};

use super::{Column, FormattingRule, GroupConfig, Row, SummaryConfig};
use crate::config::GridOptions;
use crate::error::Result;

/// Everything the grid renders from, as one document.
///
/// The data layer hands over a fresh snapshot whenever its records change;
/// the grid keeps nothing from the previous one except transient interaction
/// state.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSnapshot {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub rules: Vec<FormattingRule>,
    pub group_config: Option<GroupConfig>,
    pub summary_config: Option<SummaryConfig>,
    /// Persisted column key order
    pub column_order: Option<Vec<String>>,
    pub selected_row_ids: Vec<String>,
    pub options: Option<GridOptions>,
}

impl GridSnapshot {
    /// Decode a snapshot from JSON.
    ///
    /// # Errors
    /// Returns an error if the document does not match the snapshot shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
