//! Cell display and inline editing tests

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{column, enriched, enrichment_column, row};
use leadgrid::cell::{
    column_icon, render_cell, CellEditor, CellIcon, EditKey, EditOutcome, TextEmphasis,
};
use leadgrid::{CellStatus, ColumnType, GridEvent, Row};
use test_case::test_case;

#[test_case(ColumnType::Person, CellIcon::User ; "person")]
#[test_case(ColumnType::Company, CellIcon::Building ; "company")]
#[test_case(ColumnType::Email, CellIcon::Mail ; "email")]
#[test_case(ColumnType::Link, CellIcon::Link ; "link")]
#[test_case(ColumnType::Formula, CellIcon::Function ; "formula")]
fn test_header_icons(column_type: ColumnType, icon: CellIcon) {
    assert_eq!(column_icon(column_type), icon);
}

#[test]
fn test_structured_types_show_icon_and_text() {
    let link = render_cell(
        &column("site", ColumnType::Link),
        &row("1", &[("site", "www.acme.com")]),
    );
    assert_eq!(link.icon, Some(CellIcon::Link));
    assert_eq!(link.text, "acme.com");
    assert_eq!(link.href.as_deref(), Some("https://www.acme.com"));

    let email = render_cell(
        &column("email", ColumnType::Email),
        &row("1", &[("email", "ada@acme.com")]),
    );
    assert_eq!(email.icon, Some(CellIcon::Mail));
    assert_eq!(email.href.as_deref(), Some("mailto:ada@acme.com"));

    let plain = render_cell(&column("notes", ColumnType::Text), &row("1", &[("notes", "hi")]));
    assert_eq!(plain.icon, None);
    assert_eq!(plain.text, "hi");
}

#[test]
fn test_person_name_from_source() {
    let row: Row = serde_json::from_str(
        r#"{"id":"1","cells":{},"source":{"first_name":"Grace","last_name":"Hopper"}}"#,
    )
    .unwrap();
    let display = render_cell(&column("contact", ColumnType::Person), &row);
    assert_eq!(display.text, "Grace Hopper");
    assert_eq!(display.initials.as_deref(), Some("GH"));
}

#[test]
fn test_typed_formatting() {
    let row = row(
        "1",
        &[
            ("amount", "-1234.5"),
            ("deal", "2500000"),
            ("closed", "2024-03-09"),
            ("tags", "hot, , enterprise ,"),
            ("done", "Yes"),
        ],
    );
    assert_eq!(render_cell(&column("amount", ColumnType::Number), &row).text, "-1,234.5");
    assert_eq!(render_cell(&column("deal", ColumnType::Currency), &row).text, "$2,500,000");
    assert_eq!(render_cell(&column("closed", ColumnType::Date), &row).text, "Mar 9, 2024");
    let tags = render_cell(&column("tags", ColumnType::Tags), &row);
    assert_eq!(tags.tags, vec!["hot", "enterprise"]);
    assert_eq!(render_cell(&column("done", ColumnType::Checkbox), &row).checked, Some(true));
    assert_eq!(render_cell(&column("nope", ColumnType::Checkbox), &row).checked, Some(false));
}

#[test]
fn test_action_cell_uses_column_label() {
    let mut action = column("run", ColumnType::Action);
    action.label = "Send email".to_string();
    let display = render_cell(&action, &Row::new("1"));
    assert_eq!(display.text, "Send email");
    assert!(!display.editable);
}

#[test_case(Some(0.95), TextEmphasis::Full, 1.0, false ; "high")]
#[test_case(Some(0.8), TextEmphasis::Full, 1.0, false ; "boundary high")]
#[test_case(Some(0.5), TextEmphasis::Reduced, 0.7, false ; "boundary medium")]
#[test_case(Some(0.49), TextEmphasis::Muted, 0.5, true ; "low")]
#[test_case(None, TextEmphasis::Full, 1.0, false ; "unknown")]
fn test_confidence_emphasis(confidence: Option<f64>, emphasis: TextEmphasis, opacity: f32, italic: bool) {
    let mut row = Row::new("1");
    row.cells.insert(
        "title".to_string(),
        enriched(Some("CTO"), confidence, CellStatus::Complete),
    );
    let display = render_cell(&enrichment_column("title", ColumnType::Text), &row);
    assert_eq!(display.emphasis, emphasis);
    assert_eq!(display.opacity, opacity);
    assert_eq!(display.italic, italic);
}

#[test]
fn test_confidence_ignored_outside_enrichment_columns() {
    let row = Row::new("1").with_cell("title", enriched(Some("CTO"), Some(0.1), CellStatus::None));
    let display = render_cell(&column("title", ColumnType::Text), &row);
    assert_eq!(display.emphasis, TextEmphasis::Full);
}

#[test_case(ColumnType::Text, CellStatus::None, true ; "plain text")]
#[test_case(ColumnType::Text, CellStatus::Complete, true ; "complete enrichment")]
#[test_case(ColumnType::Text, CellStatus::Pending, false ; "pending")]
#[test_case(ColumnType::Text, CellStatus::Failed, false ; "failed")]
#[test_case(ColumnType::Formula, CellStatus::None, false ; "formula")]
#[test_case(ColumnType::Integration, CellStatus::None, false ; "integration")]
fn test_editability(column_type: ColumnType, status: CellStatus, editable: bool) {
    let row = Row::new("1").with_cell("f", enriched(Some("x"), None, status));
    let column = column("f", column_type);
    assert_eq!(render_cell(&column, &row).editable, editable);
    assert_eq!(CellEditor::new().begin(&column, &row), editable);
}

#[test]
fn test_pending_cell_hides_value() {
    let row = Row::new("1").with_cell("email", enriched(Some("old@x.io"), None, CellStatus::Pending));
    let display = render_cell(&enrichment_column("email", ColumnType::Email), &row);
    assert_eq!(display.status, CellStatus::Pending);
    assert!(display.text.is_empty());
    assert!(!display.can_enrich);
}

#[test]
fn test_edit_commit_emits_changed_value() {
    let column = column("name", ColumnType::Text);
    let row = row("r1", &[("name", "Ada")]);
    let mut editor = CellEditor::new();
    assert!(editor.begin(&column, &row));
    assert!(editor.is_editing_cell("r1", "name"));
    editor.input("Ada Lovelace");

    assert_eq!(
        editor.key(EditKey::Enter),
        EditOutcome::Committed {
            event: Some(GridEvent::CellEdited {
                row_id: "r1".into(),
                column_key: "name".into(),
                value: "Ada Lovelace".into(),
            }),
            advance: false,
        }
    );
    assert!(!editor.is_editing());
}

#[test]
fn test_escape_discards_draft() {
    let column = column("name", ColumnType::Text);
    let row = row("r1", &[("name", "Ada")]);
    let mut editor = CellEditor::new();
    editor.begin(&column, &row);
    editor.input("typo");
    assert_eq!(editor.key(EditKey::Escape), EditOutcome::Cancelled);
    assert_eq!(editor.blur(), EditOutcome::Ignored);
}

#[test]
fn test_blur_on_missing_value_without_typing_is_noop() {
    let column = column("phone", ColumnType::Phone);
    let row = Row::new("r1");
    let mut editor = CellEditor::new();
    editor.begin(&column, &row);
    editor.input("");
    assert_eq!(
        editor.blur(),
        EditOutcome::Committed {
            event: None,
            advance: false
        }
    );
}

#[test]
fn test_other_keys_keep_editing() {
    let column = column("name", ColumnType::Text);
    let row = Row::new("r1");
    let mut editor = CellEditor::new();
    editor.begin(&column, &row);
    assert_eq!(editor.key(EditKey::from_key("a")), EditOutcome::Ignored);
    assert!(editor.is_editing());
    match editor.key(EditKey::Tab) {
        EditOutcome::Committed { advance, .. } => assert!(advance),
        other => panic!("unexpected {other:?}"),
    }
}
