use serde::Serialize;

/// Outbound notifications for the data layer. The grid never persists
/// anything itself; every change is reported through one of these.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GridEvent {
    /// A row's selection checkbox was toggled
    RowSelectionToggled { row_id: String, selected: bool },
    /// An inline edit committed a changed value
    CellEdited {
        row_id: String,
        column_key: String,
        value: String,
    },
    /// The "+" header was clicked
    AddColumnRequested,
    /// A column header was clicked (sort/menu is up to the caller)
    ColumnHeaderClicked { column_id: String },
    /// Full key order after a drag-reorder
    ColumnOrderChanged { keys: Vec<String> },
    /// Width committed at the end of a resize gesture
    ColumnResized { column_id: String, width: f32 },
    /// Run enrichment for one cell
    EnrichmentRequested { row_id: String, column_id: String },
}
