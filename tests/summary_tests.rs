//! Summary aggregator tests

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::row;
use leadgrid::summary::{aggregate, display_value, summarize};
use leadgrid::{AggregateKind, AggregateValue, Row, SummaryConfig};
use test_case::test_case;

/// Rows holding `amount` values; `None` leaves the cell out.
fn amounts(values: &[Option<&str>]) -> Vec<Row> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| match v {
            Some(v) => row(&i.to_string(), &[("amount", v)]),
            None => Row::new(&i.to_string()),
        })
        .collect()
}

#[test]
fn test_sum_skips_non_numeric() {
    let rows = amounts(&[Some("10"), Some("bad"), Some("20"), None]);
    assert_eq!(aggregate(&rows, "amount", AggregateKind::Sum), AggregateValue::Number(30.0));

    let mut config = SummaryConfig::new();
    config.insert("amount".to_string(), AggregateKind::Sum);
    let summaries = summarize(&rows, &config, "-");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].display, "30");
}

#[test]
fn test_average_of_non_numeric_is_placeholder() {
    let rows = amounts(&[Some("n/a"), Some("tbd"), None]);
    let value = aggregate(&rows, "amount", AggregateKind::Average);
    assert_eq!(value, AggregateValue::Placeholder);
    assert_eq!(display_value(value, "-"), "-");
}

#[test_case(AggregateKind::Count, "0" ; "count")]
#[test_case(AggregateKind::Sum, "0" ; "sum")]
#[test_case(AggregateKind::Average, "-" ; "average")]
#[test_case(AggregateKind::Min, "-" ; "min")]
#[test_case(AggregateKind::Max, "-" ; "max")]
#[test_case(AggregateKind::FilledPercent, "0%" ; "filled percent")]
#[test_case(AggregateKind::UniqueCount, "0" ; "unique count")]
#[test_case(AggregateKind::None, "" ; "none")]
fn test_zero_rows(kind: AggregateKind, expected: &str) {
    let display = display_value(aggregate(&[], "amount", kind), "-");
    assert_eq!(display, expected);
    assert!(!display.contains("NaN"));
}

#[test_case(AggregateKind::Count, "4" ; "count filled")]
#[test_case(AggregateKind::Sum, "1,220.5" ; "sum")]
#[test_case(AggregateKind::Average, "305.13" ; "average")]
#[test_case(AggregateKind::Min, "-40" ; "min")]
#[test_case(AggregateKind::Max, "1,200" ; "max")]
#[test_case(AggregateKind::FilledPercent, "67%" ; "filled percent")]
#[test_case(AggregateKind::UniqueCount, "3" ; "unique count")]
fn test_mixed_column(kind: AggregateKind, expected: &str) {
    let rows = amounts(&[
        Some("$1,200"),
        Some("100.5"),
        None,
        Some("-40"),
        Some("-40"),
        Some("  "),
    ]);
    assert_eq!(display_value(aggregate(&rows, "amount", kind), "-"), expected);
}

#[test]
fn test_unique_count_is_exact_text() {
    let rows = amounts(&[Some("Won"), Some("won"), Some(" Won ")]);
    assert_eq!(
        aggregate(&rows, "amount", AggregateKind::UniqueCount),
        AggregateValue::Count(2)
    );
}

#[test]
fn test_config_decodes_snake_case_kinds() {
    let config: SummaryConfig = serde_json::from_str(
        r#"{"amount":"average","email":"filled_percent","company":"unique_count","notes":"none"}"#,
    )
    .unwrap();
    assert_eq!(config["email"], AggregateKind::FilledPercent);
    assert_eq!(config["notes"], AggregateKind::None);

    let rows = vec![row("1", &[("email", "a@b.co"), ("company", "Acme")]), Row::new("2")];
    let summaries = summarize(&rows, &config, "-");
    let displays: Vec<(&str, &str)> = summaries
        .iter()
        .map(|s| (s.column_key.as_str(), s.display.as_str()))
        .collect();
    assert_eq!(
        displays,
        vec![("amount", "-"), ("company", "1"), ("email", "50%"), ("notes", "")]
    );
}
