//! Common test builders for grid inputs.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use leadgrid::{CellStatus, CellValue, Column, ColumnType, GridOptions, Row};

/// A visible column whose id equals its key.
#[must_use]
pub fn column(key: &str, column_type: ColumnType) -> Column {
    Column::new(key, &key.to_uppercase(), column_type)
}

/// Text columns for each key.
#[must_use]
pub fn text_columns(keys: &[&str]) -> Vec<Column> {
    keys.iter().map(|k| column(k, ColumnType::Text)).collect()
}

/// An enrichment column.
#[must_use]
pub fn enrichment_column(key: &str, column_type: ColumnType) -> Column {
    Column {
        is_enrichment: true,
        ..column(key, column_type)
    }
}

/// A hidden column.
#[must_use]
pub fn hidden(mut column: Column) -> Column {
    column.visible = false;
    column
}

/// A row with plain text cells.
#[must_use]
pub fn row(id: &str, cells: &[(&str, &str)]) -> Row {
    cells
        .iter()
        .fold(Row::new(id), |r, (k, v)| r.with_cell(k, CellValue::text(v)))
}

/// An enrichment cell value.
#[must_use]
pub fn enriched(value: Option<&str>, confidence: Option<f64>, status: CellStatus) -> CellValue {
    CellValue {
        value: value.map(str::to_string),
        confidence,
        status,
    }
}

/// `n` rows with ids `r0..rN` and a `name` cell.
#[must_use]
pub fn numbered_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let name = format!("Lead {i}");
            row(&format!("r{i}"), &[("name", name.as_str())])
        })
        .collect()
}

/// Options with a fixed body height.
#[must_use]
pub fn options(row_height: f32, viewport_height: f32, overscan: usize) -> GridOptions {
    GridOptions {
        row_height,
        viewport_height,
        overscan,
        ..GridOptions::default()
    }
}

/// Keys of a column list, in order.
#[must_use]
pub fn keys(columns: &[&Column]) -> Vec<String> {
    columns.iter().map(|c| c.key.clone()).collect()
}
