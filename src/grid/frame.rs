//! Output of one render pass.

use serde::Serialize;

use crate::cell::{CellDisplay, CellIcon, EditSession};
use crate::layout::{Viewport, VirtualWindow};
use crate::types::{CellStyle, ColumnType};

/// Everything the host draws for one pass. Only items inside `window` are
/// materialized.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub total_width: f32,
    pub total_height: f32,
    /// Number of items in the flattened sequence, including group headers
    pub item_count: usize,
    pub window: VirtualWindow,
    pub columns: Vec<HeaderCell>,
    pub items: Vec<FrameItem>,
    pub footer: Vec<FooterCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<EditSession>,
    pub selected_count: usize,
}

/// One laid-out column header.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub id: String,
    pub key: String,
    pub label: String,
    pub column_type: ColumnType,
    pub icon: CellIcon,
    pub is_enrichment: bool,
    pub x: f32,
    pub width: f32,
    /// Width is a live preview of an unfinished resize
    pub resizing: bool,
    pub drag_source: bool,
    pub drop_target: bool,
}

/// One materialized body item.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FrameItem {
    GroupHeader {
        index: usize,
        top: f32,
        height: f32,
        group_key: String,
        label: String,
        count: usize,
        collapsed: bool,
    },
    Row {
        index: usize,
        top: f32,
        height: f32,
        row_id: String,
        selected: bool,
        hovered: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        row_style: Option<CellStyle>,
        cells: Vec<FrameCell>,
    },
}

impl FrameItem {
    pub fn index(&self) -> usize {
        match self {
            Self::GroupHeader { index, .. } | Self::Row { index, .. } => *index,
        }
    }

    pub fn row_id(&self) -> Option<&str> {
        match self {
            Self::Row { row_id, .. } => Some(row_id),
            Self::GroupHeader { .. } => None,
        }
    }
}

/// One cell of a materialized row, in visible-column order.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrameCell {
    pub column_key: String,
    #[serde(flatten)]
    pub display: CellDisplay,
    /// Effective style: the cell rule for this column, else the row rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
    pub editing: bool,
}

/// Footer summary aligned under a visible column.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FooterCell {
    pub column_key: String,
    pub x: f32,
    pub width: f32,
    pub display: String,
}
