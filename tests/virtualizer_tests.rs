//! Windowing tests
//!
//! The number of materialized items must stay bounded by the viewport,
//! whatever the item count.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{numbered_rows, options, text_columns};
use leadgrid::layout::{ItemOffsets, Virtualizer};
use leadgrid::{DataGrid, GridOptions, GridSnapshot, GroupConfig};
use test_case::test_case;

#[test_case(0 ; "empty list")]
#[test_case(1 ; "single item")]
#[test_case(25 ; "fits in viewport")]
#[test_case(1_000 ; "thousand")]
#[test_case(50_000 ; "fifty thousand")]
fn test_window_bounded_independent_of_count(count: usize) {
    let v = Virtualizer::new(36.0, 5);
    let viewport = 600.0;
    let bound = v.max_window_len(viewport);
    assert_eq!(bound, 17 + 1 + 10);

    let total = v.total_height(count);
    let mut scroll = 0.0;
    while scroll <= total {
        let w = v.window(count, scroll, viewport);
        assert!(w.len() <= bound, "window {w:?} exceeds {bound}");
        assert!(w.end <= count);
        assert!(w.start <= w.end);
        scroll += 997.0;
    }
}

#[test]
fn test_window_covers_viewport() {
    let v = Virtualizer::new(36.0, 0);
    let w = v.window(10_000, 3_610.0, 600.0);
    // first visible item is 100 (3600..3636), last is 116 (4176..4212)
    assert_eq!(w.start, 100);
    assert_eq!(w.end, 117);
    assert_eq!(w.offset_top, 3_600.0);
}

#[test]
fn test_scroll_past_end_yields_tail() {
    let v = Virtualizer::new(20.0, 2);
    let w = v.window(100, 1e9, 100.0);
    assert_eq!(w.end, 100);
    assert!(w.len() <= v.max_window_len(100.0));
}

#[test]
fn test_mixed_heights_window_is_bounded() {
    let heights = (0..20_000).map(|i| if i % 50 == 0 { 48.0 } else { 36.0 });
    let offsets = ItemOffsets::from_heights(heights);
    let bound = Virtualizer::new(36.0, 5).max_window_len(600.0);
    for scroll in [0.0, 12_345.0, 400_000.0, offsets.total_height()] {
        let w = offsets.window(scroll, 600.0, 5);
        assert!(w.len() <= bound, "window {w:?} exceeds {bound}");
        assert_eq!(w.offset_top, offsets.offset_of(w.start));
    }
}

#[test]
fn test_grid_renders_window_of_large_table() {
    let snapshot = GridSnapshot {
        columns: text_columns(&["name"]),
        rows: numbered_rows(50_000),
        options: Some(options(36.0, 600.0, 5)),
        ..GridSnapshot::default()
    };
    let mut grid = DataGrid::from_snapshot(snapshot);
    grid.set_scroll(0.0, 900_000.0);

    let frame = grid.render();
    assert_eq!(frame.item_count, 50_000);
    assert_eq!(frame.total_height, 1_800_000.0);
    assert!(frame.items.len() <= 28);
    assert_eq!(frame.items[0].index(), frame.window.start);
    assert_eq!(frame.items[0].row_id(), Some(format!("r{}", frame.window.start).as_str()));
}

#[test]
fn test_taller_group_headers_use_offsets() {
    let mut rows = numbered_rows(200);
    for (i, row) in rows.iter_mut().enumerate() {
        let stage = if i % 2 == 0 { "Won" } else { "Lost" };
        row.cells
            .insert("stage".to_string(), leadgrid::CellValue::text(stage));
    }
    let snapshot = GridSnapshot {
        columns: text_columns(&["name", "stage"]),
        rows,
        group_config: Some(GroupConfig::new("stage")),
        options: Some(GridOptions {
            group_header_height: Some(48.0),
            ..options(36.0, 360.0, 1)
        }),
        ..GridSnapshot::default()
    };
    let grid = DataGrid::from_snapshot(snapshot);
    let frame = grid.render();

    // two headers plus 200 rows
    assert_eq!(frame.item_count, 202);
    assert_eq!(frame.total_height, 2.0 * 48.0 + 200.0 * 36.0);
    assert_eq!(frame.window.start, 0);
    // header (48) then rows at 36
    let tops: Vec<f32> = frame
        .items
        .iter()
        .take(3)
        .map(|item| match item {
            leadgrid::grid::FrameItem::GroupHeader { top, .. }
            | leadgrid::grid::FrameItem::Row { top, .. } => *top,
        })
        .collect();
    assert_eq!(tops, vec![0.0, 48.0, 84.0]);
}
