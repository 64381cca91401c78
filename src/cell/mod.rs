//! Cell presentation and inline editing.

mod display;
mod editor;

pub use display::{column_icon, is_editable, render_cell, CellDisplay, CellIcon, TextEmphasis};
pub use editor::{CellEditor, EditKey, EditOutcome, EditSession};
