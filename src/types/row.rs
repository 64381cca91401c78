use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Population status of a cell.
///
/// Enrichment cells move `None -> Pending -> Complete | Failed`; user-entered
/// cells stay at `None`, which reads as complete.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    #[default]
    None,
    Pending,
    Complete,
    Failed,
}

impl CellStatus {
    /// Position along the enrichment progression.
    fn rank(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Pending => 1,
            Self::Complete | Self::Failed => 2,
        }
    }

    /// Whether moving to `next` follows the progression. A finished cell may
    /// be re-run, which restarts it at `Pending`.
    pub fn can_advance_to(self, next: CellStatus) -> bool {
        next.rank() > self.rank() || (self.rank() == 2 && next == Self::Pending)
    }

    /// Cells that are mid-flight or broken cannot be edited by hand.
    pub fn blocks_editing(self) -> bool {
        matches!(self, Self::Pending | Self::Failed)
    }
}

/// A single cell's value and enrichment metadata.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CellValue {
    /// Text value; numbers and booleans sent by the data layer are normalized
    /// to their string form
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    /// Enrichment confidence in 0..=1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub status: CellStatus,
}

/// The canonical missing cell.
pub static EMPTY_CELL: CellValue = CellValue::EMPTY;

impl CellValue {
    /// `{value: null, status: none}`
    pub const EMPTY: CellValue = CellValue {
        value: None,
        confidence: None,
        status: CellStatus::None,
    };

    /// A plain user-entered value.
    pub fn text(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::default()
        }
    }

    /// True when there is no value or it is only whitespace.
    pub fn is_empty(&self) -> bool {
        self.value.as_deref().map_or(true, |v| v.trim().is_empty())
    }

    /// The value if it is not empty.
    pub fn non_empty(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Number(n)) => Some(if let Some(i) = n.as_i64() {
            i.to_string()
        } else if let Some(u) = n.as_u64() {
            u.to_string()
        } else {
            n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
        }),
        Some(other) => Some(other.to_string()),
    })
}

/// One record of the grid. Cells are sparse and keyed by column key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: String,
    #[serde(default)]
    pub cells: HashMap<String, CellValue>,
    /// Opaque record from the data layer, read only for display hints
    #[serde(default, alias = "sourceData", skip_serializing_if = "Option::is_none")]
    pub source: Option<serde_json::Value>,
}

impl Row {
    /// Create an empty row.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    /// Builder-style cell insert.
    #[must_use]
    pub fn with_cell(mut self, key: &str, cell: CellValue) -> Self {
        self.cells.insert(key.to_string(), cell);
        self
    }

    /// Cell for a column key; missing cells read as [`EMPTY_CELL`].
    pub fn cell(&self, key: &str) -> &CellValue {
        self.cells.get(key).unwrap_or(&EMPTY_CELL)
    }

    /// Non-empty value for a column key.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.cell(key).non_empty()
    }

    /// First non-empty string field of the source payload among `keys`.
    pub fn source_str(&self, keys: &[&str]) -> Option<&str> {
        let object = self.source.as_ref()?.as_object()?;
        keys.iter()
            .filter_map(|k| object.get(*k)?.as_str())
            .map(str::trim)
            .find(|s| !s.is_empty())
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
    fn test_cell_values_accept_scalars() {
        let row: Row = serde_json::from_str(
            r#"{"id":"1","cells":{
                "amount":{"value":10},
                "ratio":{"value":2.5},
                "done":{"value":true},
                "stage":{"value":"Won","status":"complete","confidence":0.9},
                "empty":{"value":null}
            }}"#,
        )
        .unwrap();
        assert_eq!(row.value("amount"), Some("10"));
        assert_eq!(row.value("ratio"), Some("2.5"));
        assert_eq!(row.value("done"), Some("true"));
        assert_eq!(row.cell("stage").status, CellStatus::Complete);
        assert_eq!(row.cell("stage").confidence, Some(0.9));
        assert_eq!(row.value("empty"), None);
    }

    #[test]
    fn test_missing_cell_is_canonical_empty() {
        let row = Row::new("r1");
        assert_eq!(row.cell("nope"), &CellValue::EMPTY);
        assert!(row.cell("nope").is_empty());
        assert!(CellValue::text("   ").is_empty());
    }

    #[test]
    fn test_source_hints() {
        let row: Row = serde_json::from_str(
            r#"{"id":"1","sourceData":{"first_name":" Ada ","lastName":"Lovelace"}}"#,
        )
        .unwrap();
        assert_eq!(row.source_str(&["firstName", "first_name"]), Some("Ada"));
        assert_eq!(row.source_str(&["last_name", "lastName"]), Some("Lovelace"));
        assert_eq!(row.source_str(&["company"]), None);
    }

    #[test]
    fn test_status_progression() {
        assert!(CellStatus::None.can_advance_to(CellStatus::Pending));
        assert!(CellStatus::Pending.can_advance_to(CellStatus::Complete));
        assert!(CellStatus::Pending.can_advance_to(CellStatus::Failed));
        assert!(CellStatus::Failed.can_advance_to(CellStatus::Pending));
        assert!(!CellStatus::Complete.can_advance_to(CellStatus::None));
        assert!(!CellStatus::Pending.can_advance_to(CellStatus::None));
        assert!(CellStatus::Pending.blocks_editing());
        assert!(!CellStatus::Complete.blocks_editing());
    }
}
