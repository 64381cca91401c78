//! Conditional formatting evaluation.
//!
//! Rules are evaluated in list order and the first matching rule wins per
//! target: per column for cell-scoped rules, once per row for row-scoped
//! rules. Styles never blend. A row style is the default for every cell of
//! the row; a cell rule that fires for a column overrides it for that column.

use std::collections::HashMap;

use crate::numeric::parse_number;
use crate::types::{CellStyle, CellValue, FormatOperator, FormatScope, FormattingRule, Row};

/// Styles resolved for one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFormatting {
    /// Style from the first matching row-scoped rule
    pub row_style: Option<CellStyle>,
    /// Style from the first matching cell-scoped rule, by column key
    pub cell_styles: HashMap<String, CellStyle>,
}

impl RowFormatting {
    /// Effective style for one cell: the cell override, else the row style.
    pub fn style_for(&self, column_key: &str) -> Option<&CellStyle> {
        self.cell_styles
            .get(column_key)
            .or(self.row_style.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.row_style.is_none() && self.cell_styles.is_empty()
    }
}

/// Evaluate every enabled rule against one row.
pub fn evaluate_row(rules: &[FormattingRule], row: &Row) -> RowFormatting {
    let mut result = RowFormatting::default();

    for rule in rules.iter().filter(|r| r.enabled) {
        match rule.scope {
            FormatScope::Row => {
                if result.row_style.is_none() && rule_matches(rule, row.cell(&rule.field)) {
                    result.row_style = Some(rule.style.clone());
                }
            }
            FormatScope::Cell => {
                if result.cell_styles.contains_key(&rule.field) {
                    continue;
                }
                if rule_matches(rule, row.cell(&rule.field)) {
                    result
                        .cell_styles
                        .insert(rule.field.clone(), rule.style.clone());
                }
            }
        }
    }

    result
}

/// Whether `rule` matches a cell value.
pub fn rule_matches(rule: &FormattingRule, cell: &CellValue) -> bool {
    compare(rule.operator, cell, &rule.comparison_value)
}

fn compare(operator: FormatOperator, cell: &CellValue, comparison: &str) -> bool {
    let value = cell.value.as_deref().unwrap_or("");

    match operator {
        FormatOperator::IsEmpty => cell.is_empty(),
        FormatOperator::IsNotEmpty => !cell.is_empty(),
        FormatOperator::Equals => values_equal(value, comparison),
        FormatOperator::NotEquals => !values_equal(value, comparison),
        FormatOperator::Contains => !cell.is_empty() && fold(value).contains(&fold(comparison)),
        FormatOperator::NotContains => cell.is_empty() || !fold(value).contains(&fold(comparison)),
        FormatOperator::StartsWith => {
            !cell.is_empty() && fold(value).starts_with(&fold(comparison))
        }
        FormatOperator::EndsWith => !cell.is_empty() && fold(value).ends_with(&fold(comparison)),
        FormatOperator::GreaterThan
        | FormatOperator::LessThan
        | FormatOperator::GreaterOrEqual
        | FormatOperator::LessOrEqual => {
            let (Some(v), Some(c)) = (parse_number(value), parse_number(comparison)) else {
                return false;
            };
            match operator {
                FormatOperator::GreaterThan => v > c,
                FormatOperator::LessThan => v < c,
                FormatOperator::GreaterOrEqual => v >= c,
                _ => v <= c,
            }
        }
    }
}

/// Numbers compare numerically ("10" equals "10.0"), everything else as
/// trimmed case-insensitive text.
fn values_equal(value: &str, comparison: &str) -> bool {
    match (parse_number(value), parse_number(comparison)) {
        (Some(v), Some(c)) => (v - c).abs() <= f64::EPSILON * v.abs().max(c.abs()).max(1.0),
        _ => fold(value) == fold(comparison),
    }
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
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
    fn test_numeric_equality() {
        assert!(values_equal("10", "10.0"));
        assert!(values_equal("$1,000", "1000"));
        assert!(!values_equal("10", "11"));
    }

    #[test]
    fn test_text_equality_folds_case() {
        assert!(values_equal(" Won ", "won"));
        assert!(!values_equal("Won", "Lost"));
    }

    #[test]
    fn test_disabled_rules_are_skipped() {
        let mut rule = FormattingRule::new(
            "stage",
            FormatOperator::IsNotEmpty,
            "",
            CellStyle::background("#fee"),
            FormatScope::Row,
        );
        rule.enabled = false;
        let row = Row::new("1").with_cell("stage", CellValue::text("Won"));
        assert!(evaluate_row(&[rule], &row).is_empty());
    }
}
