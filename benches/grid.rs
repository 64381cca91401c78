//! Benchmarks for the per-scroll work of the grid.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::indexing_slicing)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use leadgrid::grouping::{flatten, CollapsedGroups};
use leadgrid::layout::Virtualizer;
use leadgrid::summary::summarize;
use leadgrid::{
    AggregateKind, CellValue, Column, ColumnType, DataGrid, GridOptions, GroupConfig, Row,
    SummaryConfig,
};

const STAGES: [&str; 5] = ["New", "Contacted", "Qualified", "Won", "Lost"];

fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name", ColumnType::Person),
        Column::new("company", "Company", ColumnType::Company),
        Column::new("stage", "Stage", ColumnType::Dropdown),
        Column::new("amount", "Amount", ColumnType::Currency),
        Column::new("email", "Email", ColumnType::Email),
    ]
}

fn rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            Row::new(&format!("r{i}"))
                .with_cell("name", CellValue::text(&format!("Lead {i}")))
                .with_cell("company", CellValue::text(&format!("Company {}", i % 97)))
                .with_cell("stage", CellValue::text(STAGES[i % STAGES.len()]))
                .with_cell("amount", CellValue::text(&format!("{}", (i * 37) % 10_000)))
                .with_cell("email", CellValue::text(&format!("lead{i}@example.com")))
        })
        .collect()
}

fn bench_window(c: &mut Criterion) {
    let virtualizer = Virtualizer::new(36.0, 5);
    c.bench_function("window_50k", |b| {
        b.iter(|| virtualizer.window(black_box(50_000), black_box(900_000.0), 600.0))
    });
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");
    let config = GroupConfig::new("stage");
    let collapsed = CollapsedGroups::new(Some(&config));

    for count in [1_000, 10_000, 50_000] {
        let data = rows(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("by_stage", count), &data, |b, data| {
            b.iter(|| flatten(black_box(data), Some(&config), &collapsed, "(No value)").len())
        });
    }

    group.finish();
}

fn bench_summaries(c: &mut Criterion) {
    let data = rows(50_000);
    let config: SummaryConfig = [
        ("amount".to_string(), AggregateKind::Sum),
        ("email".to_string(), AggregateKind::FilledPercent),
        ("company".to_string(), AggregateKind::UniqueCount),
    ]
    .into_iter()
    .collect();

    c.bench_function("summaries_50k", |b| {
        b.iter(|| summarize(black_box(&data), &config, "-"))
    });
}

/// A scroll step followed by a full render pass.
fn bench_render(c: &mut Criterion) {
    let mut grid = DataGrid::new(GridOptions::default());
    grid.set_columns(columns());
    grid.set_rows(rows(50_000));
    grid.set_group_config(Some(GroupConfig::new("stage")));

    c.bench_function("scroll_and_render_50k", |b| {
        b.iter(|| {
            grid.scroll_by(0.0, 360.0);
            black_box(grid.render().items.len())
        })
    });
}

criterion_group!(
    benches,
    bench_window,
    bench_flatten,
    bench_summaries,
    bench_render
);

criterion_main!(benches);
