//! Inline cell editing.
//!
//! One cell at a time moves `Display -> Editing -> Display`. The draft lives
//! here until it is committed; a commit emits [`GridEvent::CellEdited`] only
//! when the draft differs from the value the edit started from.

use serde::Serialize;

use super::display::is_editable;
use crate::types::{Column, GridEvent, Row};

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Tab,
    Escape,
    Other,
}

impl EditKey {
    /// Map a DOM `KeyboardEvent.key` string.
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// An edit in progress.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditSession {
    pub row_id: String,
    pub column_key: String,
    /// Value when the edit began, missing values read as ""
    pub original: String,
    pub draft: String,
}

/// Result of a key press or blur.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Nothing was being edited, or the key does not end the edit
    Ignored,
    /// The edit ended without a change being reported
    Cancelled,
    /// The edit was committed. `event` is `None` when the draft matched the
    /// original. `advance` is set when the commit came from Tab.
    Committed {
        event: Option<GridEvent>,
        advance: bool,
    },
}

/// Editing state for the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellEditor {
    session: Option<EditSession>,
}

impl CellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the cell at `(row_id, column_key)` is the one being edited.
    pub fn is_editing_cell(&self, row_id: &str, column_key: &str) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.row_id == row_id && s.column_key == column_key)
    }

    /// Enter edit mode on a cell. Returns false, leaving any current session
    /// untouched, when the cell is not editable. A current session on another
    /// cell is discarded; callers that want it committed call [`Self::blur`]
    /// first.
    pub fn begin(&mut self, column: &Column, row: &Row) -> bool {
        let cell = row.cell(&column.key);
        if !is_editable(column, cell) {
            log::debug!(
                "cell {}/{} is not editable ({:?}, {:?})",
                row.id,
                column.key,
                column.column_type,
                cell.status
            );
            return false;
        }
        let original = cell.value.clone().unwrap_or_default();
        self.session = Some(EditSession {
            row_id: row.id.clone(),
            column_key: column.key.clone(),
            draft: original.clone(),
            original,
        });
        true
    }

    /// Replace the draft with the current input text.
    pub fn input(&mut self, text: &str) {
        if let Some(session) = &mut self.session {
            session.draft = text.to_string();
        }
    }

    /// Handle a key while editing.
    pub fn key(&mut self, key: EditKey) -> EditOutcome {
        if self.session.is_none() {
            return EditOutcome::Ignored;
        }
        match key {
            EditKey::Enter => self.commit(false),
            EditKey::Tab => self.commit(true),
            EditKey::Escape => self.cancel(),
            EditKey::Other => EditOutcome::Ignored,
        }
    }

    /// Focus left the input: commit.
    pub fn blur(&mut self) -> EditOutcome {
        if self.session.is_none() {
            return EditOutcome::Ignored;
        }
        self.commit(false)
    }

    /// Leave edit mode, discarding the draft.
    pub fn cancel(&mut self) -> EditOutcome {
        match self.session.take() {
            Some(_) => EditOutcome::Cancelled,
            None => EditOutcome::Ignored,
        }
    }

    fn commit(&mut self, advance: bool) -> EditOutcome {
        let Some(session) = self.session.take() else {
            return EditOutcome::Ignored;
        };
        let event = (session.draft != session.original).then(|| {
            log::debug!("cell {}/{} edited", session.row_id, session.column_key);
            GridEvent::CellEdited {
                row_id: session.row_id,
                column_key: session.column_key,
                value: session.draft,
            }
        });
        EditOutcome::Committed { event, advance }
    }
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
    use crate::types::{CellStatus, CellValue, ColumnType};

    #[test]
    fn test_key_mapping() {
        assert_eq!(EditKey::from_key("Enter"), EditKey::Enter);
        assert_eq!(EditKey::from_key("Tab"), EditKey::Tab);
        assert_eq!(EditKey::from_key("Escape"), EditKey::Escape);
        assert_eq!(EditKey::from_key("a"), EditKey::Other);
    }

    #[test]
    fn test_unchanged_commit_emits_nothing() {
        let column = Column::new("name", "Name", ColumnType::Text);
        let row = Row::new("r1").with_cell("name", CellValue::text("Ada"));
        let mut editor = CellEditor::new();
        assert!(editor.begin(&column, &row));
        assert_eq!(
            editor.key(EditKey::Enter),
            EditOutcome::Committed {
                event: None,
                advance: false
            }
        );
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_failed_cell_refuses_edit() {
        let column = Column::new("email", "Email", ColumnType::Email);
        let row = Row::new("r1").with_cell(
            "email",
            CellValue {
                status: CellStatus::Failed,
                ..CellValue::default()
            },
        );
        let mut editor = CellEditor::new();
        assert!(!editor.begin(&column, &row));
        assert_eq!(editor.blur(), EditOutcome::Ignored);
    }
}
