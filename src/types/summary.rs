use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate computed for one column in the summary footer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    Count,
    Sum,
    Average,
    Min,
    Max,
    FilledPercent,
    UniqueCount,
    #[default]
    None,
}

/// Column key to aggregate. Ordered so footers render deterministically.
pub type SummaryConfig = BTreeMap<String, AggregateKind>;

/// Result of one aggregate.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AggregateValue {
    /// A counted quantity
    Count(usize),
    /// A numeric reduction
    Number(f64),
    /// A fill ratio in 0..=1
    Ratio(f64),
    /// Nothing to aggregate (e.g. an average of no numbers)
    Placeholder,
    /// The column is configured with no aggregate
    Empty,
}

/// Footer entry for one column.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub column_key: String,
    pub kind: AggregateKind,
    pub value: AggregateValue,
    /// Display text, never "NaN" or "Infinity"
    pub display: String,
}
