//! Column summaries for the grid footer.
//!
//! Aggregates run over the complete row set, ignoring grouping, collapsing
//! and windowing. Each pass recomputes from scratch.

use std::collections::HashSet;

use crate::numeric::{format_number, format_percent, parse_number};
use crate::types::{AggregateKind, AggregateValue, ColumnSummary, Row, SummaryConfig};

/// Compute one aggregate over a column.
///
/// Numeric aggregates silently skip values that do not parse as numbers.
/// Averages, minimums and maximums of no numbers are
/// [`AggregateValue::Placeholder`]; so is any reduction that overflows.
pub fn aggregate(rows: &[Row], column_key: &str, kind: AggregateKind) -> AggregateValue {
    let values = || rows.iter().filter_map(|r| r.value(column_key));
    let numbers = || values().filter_map(parse_number);

    let value = match kind {
        AggregateKind::None => AggregateValue::Empty,
        AggregateKind::Count => AggregateValue::Count(values().count()),
        AggregateKind::UniqueCount => {
            let distinct: HashSet<&str> = values().map(str::trim).collect();
            AggregateValue::Count(distinct.len())
        }
        AggregateKind::FilledPercent => {
            if rows.is_empty() {
                AggregateValue::Ratio(0.0)
            } else {
                AggregateValue::Ratio(values().count() as f64 / rows.len() as f64)
            }
        }
        AggregateKind::Sum => AggregateValue::Number(numbers().sum()),
        AggregateKind::Average => {
            let (sum, count) = numbers().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
            if count == 0 {
                AggregateValue::Placeholder
            } else {
                AggregateValue::Number(sum / count as f64)
            }
        }
        AggregateKind::Min => numbers()
            .reduce(f64::min)
            .map_or(AggregateValue::Placeholder, AggregateValue::Number),
        AggregateKind::Max => numbers()
            .reduce(f64::max)
            .map_or(AggregateValue::Placeholder, AggregateValue::Number),
    };

    match value {
        AggregateValue::Number(n) | AggregateValue::Ratio(n) if !n.is_finite() => {
            AggregateValue::Placeholder
        }
        other => other,
    }
}

/// Display text for an aggregate. Never "NaN" or "Infinity".
pub fn display_value(value: AggregateValue, placeholder: &str) -> String {
    match value {
        AggregateValue::Count(n) => n.to_string(),
        AggregateValue::Number(n) => format_number(n),
        AggregateValue::Ratio(r) => format_percent(r),
        AggregateValue::Placeholder => placeholder.to_string(),
        AggregateValue::Empty => String::new(),
    }
}

/// Compute every configured aggregate, in column-key order.
pub fn summarize(rows: &[Row], config: &SummaryConfig, placeholder: &str) -> Vec<ColumnSummary> {
    config
        .iter()
        .map(|(column_key, &kind)| {
            let value = aggregate(rows, column_key, kind);
            ColumnSummary {
                column_key: column_key.clone(),
                kind,
                value,
                display: display_value(value, placeholder),
            }
        })
        .collect()
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
    use crate::types::CellValue;

    #[test]
    fn test_overflow_is_placeholder() {
        let rows = vec![
            Row::new("1").with_cell("n", CellValue::text("1e308")),
            Row::new("2").with_cell("n", CellValue::text("1e308")),
        ];
        assert_eq!(
            aggregate(&rows, "n", AggregateKind::Sum),
            AggregateValue::Placeholder
        );
    }

    #[test]
    fn test_none_kind_is_blank() {
        let value = aggregate(&[], "n", AggregateKind::None);
        assert_eq!(value, AggregateValue::Empty);
        assert_eq!(display_value(value, "-"), "");
    }
}
