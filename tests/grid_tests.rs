//! End-to-end tests of the grid engine

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{enriched, numbered_rows, options, text_columns};
use leadgrid::cell::EditKey;
use leadgrid::grid::FrameItem;
use leadgrid::{
    render_snapshot_json, CellStatus, DataGrid, GridError, GridEvent, GroupConfig, GroupSort,
};

const SNAPSHOT: &str = r##"{
    "columns": [
        {"id": "c1", "key": "name", "label": "Name", "type": "person", "width": 220},
        {"id": "c2", "key": "stage", "label": "Stage", "type": "dropdown",
         "options": ["Won", "Lost"]},
        {"id": "c3", "key": "amount", "label": "Amount", "type": "currency", "width": 40},
        {"id": "c4", "key": "email", "label": "Email", "type": "email", "isEnrichment": true},
        {"id": "c5", "key": "secret", "label": "Secret", "type": "text", "visible": false}
    ],
    "rows": [
        {"id": "1", "cells": {"name": {"value": "Ada Lovelace"}, "stage": {"value": "Won"},
                              "amount": {"value": 10},
                              "email": {"value": "ada@acme.io", "confidence": 0.4,
                                        "status": "complete"}}},
        {"id": "2", "cells": {"name": {"value": "Alan Turing"}, "stage": {"value": "Lost"},
                              "amount": {"value": "bad"},
                              "email": {"value": null, "status": "pending"}}},
        {"id": "3", "cells": {"name": {"value": "Grace Hopper"}, "stage": {"value": null},
                              "amount": {"value": 20}}}
    ],
    "rules": [
        {"field": "stage", "operator": "equals", "value": "Won", "scope": "row",
         "style": {"backgroundColor": "#e6ffe6"}},
        {"field": "amount", "operator": "greater_than", "value": 15,
         "style": {"bold": true}}
    ],
    "groupConfig": {"column_key": "stage", "collapsed_by_default": false,
                    "sort_groups_by": "alpha"},
    "summaryConfig": {"amount": "sum", "email": "filled_percent"},
    "columnOrder": ["amount", "name"],
    "selectedRowIds": ["2"],
    "options": {"rowHeight": 40, "viewportHeight": 400}
}"##;

fn row_ids(items: &[FrameItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item {
            FrameItem::GroupHeader { label, count, .. } => format!("[{label} {count}]"),
            FrameItem::Row { row_id, .. } => row_id.clone(),
        })
        .collect()
}

#[test]
fn test_snapshot_renders_full_frame() {
    let grid = DataGrid::from_json(SNAPSHOT).unwrap();
    let frame = grid.render();

    let header_keys: Vec<&str> = frame.columns.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(header_keys, vec!["amount", "name", "stage", "email"]);
    // widths clamp to the minimum and positions accumulate
    assert_eq!(frame.columns[0].width, 60.0);
    assert_eq!(frame.columns[1].x, 60.0);
    assert_eq!(frame.columns[2].x, 280.0);
    assert_eq!(frame.total_width, 60.0 + 220.0 + 150.0 + 150.0);

    assert_eq!(
        row_ids(&frame.items),
        vec!["[Lost 1]", "2", "[Won 1]", "1", "[(No value) 1]", "3"]
    );
    assert_eq!(frame.total_height, 6.0 * 40.0);
    assert_eq!(frame.selected_count, 1);

    let footer: Vec<(&str, &str)> = frame
        .footer
        .iter()
        .map(|f| (f.column_key.as_str(), f.display.as_str()))
        .collect();
    assert_eq!(
        footer,
        vec![("amount", "30"), ("name", ""), ("stage", ""), ("email", "33%")]
    );
}

#[test]
fn test_frame_cells_carry_styles_and_display() {
    let grid = DataGrid::from_json(SNAPSHOT).unwrap();
    let frame = grid.render();

    let FrameItem::Row {
        row_id,
        row_style,
        cells,
        selected,
        ..
    } = &frame.items[3]
    else {
        panic!("expected a row");
    };
    assert_eq!(row_id, "1");
    assert!(!selected);
    assert_eq!(
        row_style.as_ref().unwrap().background_color.as_deref(),
        Some("#e6ffe6")
    );
    // amount 10 does not pass the bold rule: row style applies
    assert_eq!(cells[0].display.text, "$10");
    assert_eq!(cells[0].style, row_style.clone());
    // low-confidence enrichment value
    assert_eq!(cells[3].display.opacity, 0.5);
    assert!(cells[3].display.italic);

    let FrameItem::Row { cells, selected, .. } = &frame.items[5] else {
        panic!("expected a row");
    };
    assert!(!selected);
    assert_eq!(cells[0].style.as_ref().unwrap().bold, Some(true));
    assert_eq!(cells[1].display.initials.as_deref(), Some("GH"));

    let FrameItem::Row { selected, cells, .. } = &frame.items[1] else {
        panic!("expected a row");
    };
    assert!(selected);
    assert_eq!(cells[3].display.status, CellStatus::Pending);
}

#[test]
fn test_outbound_events() {
    let mut grid = DataGrid::from_json(SNAPSHOT).unwrap();

    assert!(grid.toggle_row_selection("1").unwrap());
    assert!(!grid.toggle_row_selection("2").unwrap());
    grid.request_add_column();
    grid.click_header("c2").unwrap();
    // pending cell and non-enrichment column are refused
    assert!(!grid.request_enrichment("2", "c4").unwrap());
    assert!(!grid.request_enrichment("1", "c1").unwrap());
    assert!(grid.request_enrichment("1", "c4").unwrap());

    assert_eq!(
        grid.take_events(),
        vec![
            GridEvent::RowSelectionToggled {
                row_id: "1".into(),
                selected: true
            },
            GridEvent::RowSelectionToggled {
                row_id: "2".into(),
                selected: false
            },
            GridEvent::AddColumnRequested,
            GridEvent::ColumnHeaderClicked {
                column_id: "c2".into()
            },
            GridEvent::EnrichmentRequested {
                row_id: "1".into(),
                column_id: "c4".into()
            },
        ]
    );
    assert!(grid.take_events().is_empty());

    assert!(matches!(
        grid.toggle_row_selection("404"),
        Err(GridError::UnknownRow(_))
    ));
}

#[test]
fn test_events_serialize_for_the_host() {
    let event = GridEvent::CellEdited {
        row_id: "1".into(),
        column_key: "name".into(),
        value: "Ada".into(),
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"type": "cellEdited", "rowId": "1", "columnKey": "name", "value": "Ada"})
    );
}

#[test]
fn test_edit_flow_through_grid() {
    let mut grid = DataGrid::from_json(SNAPSHOT).unwrap();

    // pending enrichment cell cannot be edited
    assert!(!grid.begin_edit("2", "email").unwrap());

    assert!(grid.begin_edit("3", "name").unwrap());
    grid.edit_input("Rear Admiral Hopper");
    // starting another edit commits the first
    assert!(grid.begin_edit("1", "amount").unwrap());
    assert!(grid.edit_key(EditKey::Escape));

    assert_eq!(
        grid.take_events(),
        vec![GridEvent::CellEdited {
            row_id: "3".into(),
            column_key: "name".into(),
            value: "Rear Admiral Hopper".into(),
        }]
    );

    // Tab advances across visible columns: amount -> name
    grid.begin_edit("1", "amount").unwrap();
    assert!(grid.edit_key(EditKey::Tab));
    let session = grid.editor().session().unwrap();
    assert_eq!((session.row_id.as_str(), session.column_key.as_str()), ("1", "name"));
    assert!(grid.take_events().is_empty());

    let frame = grid.render();
    assert_eq!(frame.editing.as_ref().unwrap().column_key, "name");
}

#[test]
fn test_enrichment_completion_updates_cell() {
    let mut grid = DataGrid::from_json(SNAPSHOT).unwrap();
    grid.update_cell(
        "2",
        "email",
        enriched(Some("alan@bletchley.uk"), Some(0.9), CellStatus::Complete),
    )
    .unwrap();
    assert!(grid.begin_edit("2", "email").unwrap());
    assert!(matches!(
        grid.update_cell("404", "email", enriched(None, None, CellStatus::Pending)),
        Err(GridError::UnknownRow(_))
    ));

    // flipping back to pending cancels the edit in progress
    grid.update_cell("2", "email", enriched(None, None, CellStatus::Pending))
        .unwrap();
    assert!(!grid.editor().is_editing());
}

#[test]
fn test_collapse_and_group_config_reset() {
    let mut grid = DataGrid::from_json(SNAPSHOT).unwrap();
    assert!(grid.toggle_group("Won"));
    assert_eq!(
        row_ids(&grid.render().items),
        vec!["[Lost 1]", "2", "[Won 1]", "[(No value) 1]", "3"]
    );

    // same config: state survives
    grid.set_group_config(Some(GroupConfig::new("stage")));
    assert!(grid.is_group_collapsed("Won"));

    // different config: state resets
    grid.set_group_config(Some(GroupConfig {
        sort_groups_by: GroupSort::Count,
        ..GroupConfig::new("stage")
    }));
    assert!(!grid.is_group_collapsed("Won"));

    grid.collapse_all();
    assert_eq!(grid.render().item_count, 3);
    grid.set_group_config(None);
    assert_eq!(row_ids(&grid.render().items), vec!["1", "2", "3"]);
}

#[test]
fn test_scroll_to_row_and_clamping() {
    let mut grid = DataGrid::new(options(40.0, 400.0, 2));
    grid.set_columns(text_columns(&["name"]));
    grid.set_rows(numbered_rows(100));

    assert!(grid.scroll_to_row("r50"));
    // row 50 spans 2000..2040: its bottom is aligned to the viewport bottom
    assert_eq!(grid.viewport().scroll_y, 1_640.0);
    assert!(!grid.scroll_to_row("r45"));
    assert!(!grid.scroll_to_row("missing"));

    grid.scroll_by(0.0, 1e9);
    assert_eq!(grid.viewport().scroll_y, 4_000.0 - 400.0);

    // fewer rows shrink the scroll range
    grid.set_rows(numbered_rows(5));
    assert_eq!(grid.viewport().scroll_y, 0.0);
}

#[test]
fn test_reset_interaction_clears_transient_state() {
    let mut grid = DataGrid::from_json(SNAPSHOT).unwrap();
    grid.toggle_group("Lost");
    grid.set_hover_row(Some("1"));
    grid.begin_edit("1", "name").unwrap();
    grid.request_add_column();

    grid.reset_interaction();
    assert!(!grid.is_group_collapsed("Lost"));
    assert_eq!(grid.hover_row(), None);
    assert!(!grid.editor().is_editing());
    assert_eq!(grid.pending_events().len(), 1);
}

#[test]
fn test_render_snapshot_json() {
    let json = render_snapshot_json(SNAPSHOT).unwrap();
    let frame: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(frame["itemCount"], 6);
    assert_eq!(frame["items"][0]["kind"], "groupHeader");
    assert_eq!(frame["items"][1]["rowId"], "2");
    assert_eq!(frame["footer"][0]["display"], "30");
}

#[test]
fn test_bad_snapshot_is_an_error() {
    assert!(matches!(
        DataGrid::from_json("{\"rows\": 7}"),
        Err(GridError::Json(_))
    ));
}
