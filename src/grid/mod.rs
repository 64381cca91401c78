//! The grid engine.
//!
//! `DataGrid` owns the inputs handed over by the data layer, the transient
//! interaction state (scroll, header gesture, collapsed groups, inline edit,
//! hover) and the queue of outbound [`GridEvent`]s. Each call to
//! [`DataGrid::render`] is a pure function of that state.

mod frame;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use frame::{FooterCell, FrameCell, FrameItem, HeaderCell, RenderFrame};
#[cfg(target_arch = "wasm32")]
pub use wasm::LeadGrid;

use std::collections::{HashMap, HashSet};

use crate::cell::{column_icon, is_editable, render_cell, CellEditor, EditKey, EditOutcome};
use crate::conditional::evaluate_row;
use crate::config::{GridOptions, DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT};
use crate::error::{GridError, Result};
use crate::grouping::{flatten, CollapsedGroups};
use crate::layout::{
    visible_columns, CaptureGuard, ColumnLayout, ColumnStrip, ItemOffsets, Viewport,
    VirtualWindow, Virtualizer,
};
use crate::summary::summarize;
use crate::types::{
    CellValue, Column, ColumnSummary, FormattingRule, GridEvent, GridItem, GridSnapshot,
    GroupConfig, Row, SummaryConfig,
};

/// Vertical geometry of the flattened items. Rebuilt whenever rows, grouping,
/// collapsed groups or heights change, so scrolling never regroups rows.
#[derive(Debug)]
enum BodyLayout {
    /// Headers and rows share one height: O(1) windowing
    Uniform {
        virtualizer: Virtualizer,
        count: usize,
    },
    /// Headers differ in height: prefix sums with binary search
    Mixed {
        offsets: ItemOffsets,
        overscan: usize,
    },
}

impl Default for BodyLayout {
    fn default() -> Self {
        Self::Uniform {
            virtualizer: Virtualizer::new(DEFAULT_ROW_HEIGHT, DEFAULT_OVERSCAN),
            count: 0,
        }
    }
}

impl BodyLayout {
    fn new(items: &[GridItem<'_>], options: &GridOptions) -> Self {
        if options.uniform_item_height() {
            return Self::Uniform {
                virtualizer: Virtualizer::new(options.row_height, options.overscan),
                count: items.len(),
            };
        }
        let heights = items.iter().map(|item| {
            if item.is_header() {
                options.header_height()
            } else {
                options.row_height
            }
        });
        Self::Mixed {
            offsets: ItemOffsets::from_heights(heights),
            overscan: options.overscan,
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Uniform { count, .. } => *count,
            Self::Mixed { offsets, .. } => offsets.len(),
        }
    }

    fn total_height(&self) -> f32 {
        match self {
            Self::Uniform { virtualizer, count } => virtualizer.total_height(*count),
            Self::Mixed { offsets, .. } => offsets.total_height(),
        }
    }

    fn window(&self, scroll_top: f32, viewport_height: f32) -> VirtualWindow {
        match self {
            Self::Uniform { virtualizer, count } => {
                virtualizer.window(*count, scroll_top, viewport_height)
            }
            Self::Mixed { offsets, overscan } => {
                offsets.window(scroll_top, viewport_height, *overscan)
            }
        }
    }

    fn offset_of(&self, index: usize) -> f32 {
        match self {
            Self::Uniform { virtualizer, .. } => virtualizer.offset_of(index),
            Self::Mixed { offsets, .. } => offsets.offset_of(index),
        }
    }

    fn height_of(&self, index: usize) -> f32 {
        match self {
            Self::Uniform { virtualizer, .. } => virtualizer.item_height(),
            Self::Mixed { offsets, .. } => offsets.height_of(index),
        }
    }
}

/// Grid state and operations.
#[derive(Debug, Default)]
pub struct DataGrid {
    options: GridOptions,
    columns: Vec<Column>,
    rows: Vec<Row>,
    rules: Vec<FormattingRule>,
    group_config: Option<GroupConfig>,
    summary_config: Option<SummaryConfig>,
    column_order: Option<Vec<String>>,
    selected: HashSet<String>,

    viewport: Viewport,
    layout: ColumnLayout,
    collapsed: CollapsedGroups,
    editor: CellEditor,
    hover_row: Option<String>,
    body: BodyLayout,

    events: Vec<GridEvent>,
}

impl DataGrid {
    /// Create an empty grid.
    pub fn new(options: GridOptions) -> Self {
        let options = options.sanitized();
        let mut grid = Self {
            viewport: Viewport::new(options.viewport_width, options.viewport_height),
            options,
            ..Self::default()
        };
        grid.refresh_body();
        grid
    }

    /// Create a grid holding a snapshot.
    pub fn from_snapshot(snapshot: GridSnapshot) -> Self {
        let mut grid = Self::new(snapshot.options.clone().unwrap_or_default());
        grid.load_snapshot(snapshot);
        grid
    }

    /// Create a grid from snapshot JSON.
    ///
    /// # Errors
    /// Returns an error if the JSON does not describe a snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_snapshot(GridSnapshot::from_json(json)?))
    }

    /// Replace every input at once. Options in the snapshot replace the
    /// current options; without them the current options stay.
    pub fn load_snapshot(&mut self, snapshot: GridSnapshot) {
        let GridSnapshot {
            columns,
            rows,
            rules,
            group_config,
            summary_config,
            column_order,
            selected_row_ids,
            options,
        } = snapshot;

        if let Some(options) = options {
            self.set_options(options);
        }
        self.columns = columns;
        self.rows = rows;
        self.rules = rules;
        self.group_config = group_config;
        self.summary_config = summary_config;
        self.column_order = column_order;
        self.selected = selected_row_ids.into_iter().collect();
        self.hover_row = None;
        self.reconcile();
    }

    // ---- Inputs ----

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: GridOptions) {
        self.options = options.sanitized();
        self.viewport
            .resize(self.options.viewport_width, self.options.viewport_height);
        self.refresh_body();
        self.clamp_viewport();
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
        self.reconcile();
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.hover_row = None;
        self.reconcile();
    }

    pub fn rules(&self) -> &[FormattingRule] {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: Vec<FormattingRule>) {
        self.rules = rules;
    }

    pub fn group_config(&self) -> Option<&GroupConfig> {
        self.group_config.as_ref()
    }

    /// Change grouping. A different config resets the collapsed groups.
    pub fn set_group_config(&mut self, config: Option<GroupConfig>) {
        self.group_config = config;
        self.reconcile();
    }

    pub fn summary_config(&self) -> Option<&SummaryConfig> {
        self.summary_config.as_ref()
    }

    pub fn set_summary_config(&mut self, config: Option<SummaryConfig>) {
        self.summary_config = config;
    }

    pub fn column_order(&self) -> Option<&[String]> {
        self.column_order.as_deref()
    }

    pub fn set_column_order(&mut self, order: Option<Vec<String>>) {
        self.column_order = order;
        self.reconcile();
    }

    pub fn set_selected_row_ids(&mut self, ids: impl IntoIterator<Item = String>) {
        self.selected = ids.into_iter().collect();
    }

    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selected.contains(row_id)
    }

    /// Replace one cell, typically as an enrichment progresses.
    ///
    /// # Errors
    /// Returns [`GridError::UnknownRow`] if no row has `row_id`.
    pub fn update_cell(&mut self, row_id: &str, column_key: &str, value: CellValue) -> Result<()> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id == row_id)
            .ok_or_else(|| GridError::UnknownRow(row_id.to_string()))?;

        let previous = row.cell(column_key).status;
        if previous != value.status && !previous.can_advance_to(value.status) {
            log::warn!(
                "cell {row_id}/{column_key} moved backwards from {previous:?} to {:?}",
                value.status
            );
        }
        row.cells.insert(column_key.to_string(), value);
        self.reconcile();
        Ok(())
    }

    // ---- Transient state ----

    /// Bring transient state back in line with the inputs.
    fn reconcile(&mut self) {
        self.collapsed.sync(self.group_config.as_ref());
        self.refresh_body();

        let visible = visible_columns(
            &self.columns,
            self.column_order.as_deref(),
            self.options.column_order_offset,
        );
        self.layout.retain_columns(&self.columns, &visible);

        let edit_still_valid = self.editor.session().map(|session| {
            let row = self.rows.iter().find(|r| r.id == session.row_id);
            let column = self
                .columns
                .iter()
                .find(|c| c.visible && c.key == session.column_key);
            row.zip(column)
                .is_some_and(|(row, column)| is_editable(column, row.cell(&column.key)))
        });
        if edit_still_valid == Some(false) {
            log::debug!("edited cell is gone or locked, cancelling edit");
            self.editor.cancel();
        }

        self.clamp_viewport();
    }

    /// Drop every piece of interaction state: gesture, edit draft, hover and
    /// collapsed groups. Queued events are kept.
    pub fn reset_interaction(&mut self) {
        self.layout.reset();
        self.editor.cancel();
        self.hover_row = None;
        self.collapsed = CollapsedGroups::new(self.group_config.as_ref());
        self.refresh_body();
        self.clamp_viewport();
    }

    fn refresh_body(&mut self) {
        let items = flatten(
            &self.rows,
            self.group_config.as_ref(),
            &self.collapsed,
            &self.options.empty_group_label,
        );
        let body = BodyLayout::new(&items, &self.options);
        self.body = body;
    }

    pub fn hover_row(&self) -> Option<&str> {
        self.hover_row.as_deref()
    }

    pub fn set_hover_row(&mut self, row_id: Option<&str>) {
        self.hover_row = row_id.map(str::to_string);
    }

    pub fn column_layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn editor(&self) -> &CellEditor {
        &self.editor
    }

    // ---- Derived views ----

    /// Visible columns in display order.
    pub fn visible_columns(&self) -> Vec<&Column> {
        visible_columns(
            &self.columns,
            self.column_order.as_deref(),
            self.options.column_order_offset,
        )
    }

    /// Horizontal positions of the visible columns, preview widths included.
    pub fn column_strip(&self) -> ColumnStrip {
        ColumnStrip::new(
            self.visible_columns()
                .into_iter()
                .map(|c| self.layout.width_of(c)),
        )
    }

    /// Visible column under a header x coordinate (viewport space).
    pub fn column_at_x(&self, x: f32) -> Option<usize> {
        self.column_strip().column_at_x(x + self.viewport.scroll_x)
    }

    /// The flattened `[header | row]` sequence.
    pub fn items(&self) -> Vec<GridItem<'_>> {
        flatten(
            &self.rows,
            self.group_config.as_ref(),
            &self.collapsed,
            &self.options.empty_group_label,
        )
    }

    /// Number of flattened items, group headers included.
    pub fn item_count(&self) -> usize {
        self.body.len()
    }

    pub fn total_height(&self) -> f32 {
        self.body.total_height()
    }

    /// Items materialized at the current scroll position.
    pub fn window(&self) -> VirtualWindow {
        self.body
            .window(self.viewport.scroll_y, self.viewport.height)
    }

    /// Footer aggregates over every row.
    pub fn summaries(&self) -> Vec<ColumnSummary> {
        self.summary_config
            .as_ref()
            .map(|config| summarize(&self.rows, config, &self.options.summary_placeholder))
            .unwrap_or_default()
    }

    // ---- Scrolling ----

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn clamp_viewport(&mut self) {
        let total_width = self.column_strip().total_width();
        self.viewport
            .clamp_scroll(total_width, self.body.total_height());
    }

    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) {
        let total_width = self.column_strip().total_width();
        self.viewport
            .scroll_by(delta_x, delta_y, total_width, self.body.total_height());
    }

    pub fn set_scroll(&mut self, x: f32, y: f32) {
        let total_width = self.column_strip().total_width();
        self.viewport
            .set_scroll(x, y, total_width, self.body.total_height());
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.clamp_viewport();
    }

    /// Scroll just enough to show item `index`. Returns true if the scroll
    /// position changed.
    pub fn scroll_to_item(&mut self, index: usize) -> bool {
        if index >= self.body.len() {
            return false;
        }
        let top = self.body.offset_of(index);
        let height = self.body.height_of(index);
        self.viewport.scroll_into_view(top, height)
    }

    /// Scroll to a row if it is currently displayed (not in a collapsed
    /// group). Returns true if the scroll position changed.
    pub fn scroll_to_row(&mut self, row_id: &str) -> bool {
        let index = self.items().iter().position(|item| match item {
            GridItem::Row(row) => row.id == row_id,
            GridItem::Header(_) => false,
        });
        index.is_some_and(|i| self.scroll_to_item(i))
    }

    // ---- Groups ----

    /// Flip one group. Returns its new collapsed state.
    pub fn toggle_group(&mut self, group_key: &str) -> bool {
        let collapsed = self.collapsed.toggle(group_key);
        log::debug!("group {group_key:?} collapsed={collapsed}");
        self.refresh_body();
        self.clamp_viewport();
        collapsed
    }

    pub fn is_group_collapsed(&self, group_key: &str) -> bool {
        self.collapsed.is_collapsed(group_key)
    }

    pub fn collapse_all(&mut self) {
        self.collapsed.collapse_all();
        self.refresh_body();
        self.clamp_viewport();
    }

    pub fn expand_all(&mut self) {
        self.collapsed.expand_all();
        self.refresh_body();
    }

    // ---- Column header gestures ----

    /// Start dragging the visible column at `index`.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidMove`] if `index` is not a visible column.
    pub fn begin_column_drag(&mut self, index: usize, capture: CaptureGuard) -> Result<()> {
        let visible = visible_columns(
            &self.columns,
            self.column_order.as_deref(),
            self.options.column_order_offset,
        );
        let Some(source) = visible.get(index).copied() else {
            return Err(GridError::InvalidMove {
                from: index,
                to: index,
                len: visible.len(),
            });
        };
        self.layout.begin_drag(source, index, capture);
        Ok(())
    }

    /// Update the drop target from a header x coordinate (viewport space).
    pub fn column_drag_over(&mut self, x: f32) {
        let target = self.column_at_x(x);
        self.layout.drag_over(target);
    }

    /// Finish a drag on the current drop target. Dropping outside the header
    /// ends the drag without a reorder. Returns true if a reorder was emitted.
    pub fn end_column_drag(&mut self) -> bool {
        let Some(destination) = self.layout.drop_target() else {
            self.layout.reset();
            return false;
        };
        self.end_column_drag_at(destination)
    }

    /// Finish a drag at an explicit visible position.
    pub fn end_column_drag_at(&mut self, destination: usize) -> bool {
        let visible = visible_columns(
            &self.columns,
            self.column_order.as_deref(),
            self.options.column_order_offset,
        );
        match self.layout.end_drag(&self.columns, &visible, destination) {
            Some(event) => {
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    /// Start resizing a visible column from pointer position `start_x`.
    ///
    /// # Errors
    /// Returns [`GridError::UnknownColumn`] if no visible column has `column_id`.
    pub fn begin_column_resize(
        &mut self,
        column_id: &str,
        start_x: f32,
        capture: CaptureGuard,
    ) -> Result<()> {
        let column = self
            .columns
            .iter()
            .find(|c| c.visible && c.id == column_id)
            .ok_or_else(|| GridError::UnknownColumn(column_id.to_string()))?;
        self.layout.begin_resize(column, start_x, capture);
        Ok(())
    }

    /// Move the resize handle. Returns the preview width.
    pub fn resize_column_to(&mut self, x: f32) -> Option<f32> {
        self.layout.resize_to(x)
    }

    /// Release the resize handle. Returns true if a new width was emitted.
    pub fn end_column_resize(&mut self) -> bool {
        match self.layout.end_resize() {
            Some(event) => {
                self.events.push(event);
                self.clamp_viewport();
                true
            }
            None => false,
        }
    }

    // ---- Outbound requests ----

    /// Report a header click. Ignored while a header gesture is running.
    ///
    /// # Errors
    /// Returns [`GridError::UnknownColumn`] if no column has `column_id`.
    pub fn click_header(&mut self, column_id: &str) -> Result<()> {
        if !self.columns.iter().any(|c| c.id == column_id) {
            return Err(GridError::UnknownColumn(column_id.to_string()));
        }
        if self.layout.is_idle() {
            self.events.push(GridEvent::ColumnHeaderClicked {
                column_id: column_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn request_add_column(&mut self) {
        self.events.push(GridEvent::AddColumnRequested);
    }

    /// Flip a row's selection. Returns the new state.
    ///
    /// # Errors
    /// Returns [`GridError::UnknownRow`] if no row has `row_id`.
    pub fn toggle_row_selection(&mut self, row_id: &str) -> Result<bool> {
        if !self.rows.iter().any(|r| r.id == row_id) {
            return Err(GridError::UnknownRow(row_id.to_string()));
        }
        let selected = if self.selected.remove(row_id) {
            false
        } else {
            self.selected.insert(row_id.to_string());
            true
        };
        self.events.push(GridEvent::RowSelectionToggled {
            row_id: row_id.to_string(),
            selected,
        });
        Ok(selected)
    }

    /// Ask for an enrichment run on one cell. Only enrichment columns whose
    /// cell is not already pending qualify. Returns true if requested.
    ///
    /// # Errors
    /// Returns an error if the row or column does not exist.
    pub fn request_enrichment(&mut self, row_id: &str, column_id: &str) -> Result<bool> {
        let row = self
            .rows
            .iter()
            .find(|r| r.id == row_id)
            .ok_or_else(|| GridError::UnknownRow(row_id.to_string()))?;
        let column = self
            .columns
            .iter()
            .find(|c| c.id == column_id)
            .ok_or_else(|| GridError::UnknownColumn(column_id.to_string()))?;

        if !render_cell(column, row).can_enrich {
            log::debug!("enrichment of {row_id}/{column_id} not available");
            return Ok(false);
        }
        self.events.push(GridEvent::EnrichmentRequested {
            row_id: row_id.to_string(),
            column_id: column_id.to_string(),
        });
        Ok(true)
    }

    // ---- Inline editing ----

    /// Start editing a cell, committing any edit in progress first.
    /// Returns false if the cell is not editable.
    ///
    /// # Errors
    /// Returns an error if the row or visible column does not exist.
    pub fn begin_edit(&mut self, row_id: &str, column_key: &str) -> Result<bool> {
        self.blur_edit();
        let row = self
            .rows
            .iter()
            .find(|r| r.id == row_id)
            .ok_or_else(|| GridError::UnknownRow(row_id.to_string()))?;
        let column = self
            .columns
            .iter()
            .find(|c| c.visible && c.key == column_key)
            .ok_or_else(|| GridError::UnknownColumn(column_key.to_string()))?;
        Ok(self.editor.begin(column, row))
    }

    /// Replace the draft text.
    pub fn edit_input(&mut self, text: &str) {
        self.editor.input(text);
    }

    /// Handle a key in the editor. Returns true if the key ended the edit.
    /// Tab moves on to the next editable visible column of the same row.
    pub fn edit_key(&mut self, key: EditKey) -> bool {
        let current = self
            .editor
            .session()
            .map(|s| (s.row_id.clone(), s.column_key.clone()));
        let outcome = self.editor.key(key);
        let advance = matches!(outcome, EditOutcome::Committed { advance: true, .. });
        let handled = self.apply_outcome(outcome);
        if let (true, Some((row_id, column_key))) = (advance, current) {
            self.advance_edit(&row_id, &column_key);
        }
        handled
    }

    /// The input lost focus: commit.
    pub fn blur_edit(&mut self) -> bool {
        let outcome = self.editor.blur();
        self.apply_outcome(outcome)
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    fn apply_outcome(&mut self, outcome: EditOutcome) -> bool {
        match outcome {
            EditOutcome::Ignored => false,
            EditOutcome::Cancelled => true,
            EditOutcome::Committed { event, .. } => {
                self.events.extend(event);
                true
            }
        }
    }

    fn advance_edit(&mut self, row_id: &str, column_key: &str) {
        let visible = visible_columns(
            &self.columns,
            self.column_order.as_deref(),
            self.options.column_order_offset,
        );
        let Some(row) = self.rows.iter().find(|r| r.id == row_id) else {
            return;
        };
        let Some(position) = visible.iter().position(|c| c.key == column_key) else {
            return;
        };
        let next = visible
            .iter()
            .skip(position + 1)
            .copied()
            .find(|c| is_editable(c, row.cell(&c.key)));
        match next {
            Some(column) => {
                self.editor.begin(column, row);
            }
            None => log::debug!("no editable cell after {column_key} in row {row_id}"),
        }
    }

    // ---- Output ----

    /// Events emitted since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GridEvent] {
        &self.events
    }

    /// Build the frame for the current state.
    pub fn render(&self) -> RenderFrame {
        let visible = self.visible_columns();
        let widths: Vec<f32> = visible.iter().map(|c| self.layout.width_of(c)).collect();
        let strip = ColumnStrip::new(widths.iter().copied());
        let drag_source = self.layout.drag_source();
        let drop_target = self.layout.drop_target();

        let columns = visible
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (column, &width))| HeaderCell {
                id: column.id.clone(),
                key: column.key.clone(),
                label: column.label.clone(),
                column_type: column.column_type,
                icon: column_icon(column.column_type),
                is_enrichment: column.is_enrichment,
                x: strip.x_of(i),
                width,
                resizing: self.layout.preview_width(&column.id).is_some(),
                drag_source: drag_source == Some(i),
                drop_target: drop_target == Some(i),
            })
            .collect();

        let items = self.items();
        let body = &self.body;
        let total_height = body.total_height();
        let mut viewport = self.viewport.clone();
        viewport.clamp_scroll(strip.total_width(), total_height);
        let window = body.window(viewport.scroll_y, viewport.height);

        let frame_items = items
            .get(window.range())
            .unwrap_or_default()
            .iter()
            .zip(window.range())
            .map(|(item, index)| {
                let top = body.offset_of(index);
                let height = body.height_of(index);
                match item {
                    GridItem::Header(header) => FrameItem::GroupHeader {
                        index,
                        top,
                        height,
                        group_key: header.group_key.clone(),
                        label: header.label.clone(),
                        count: header.count,
                        collapsed: header.collapsed,
                    },
                    GridItem::Row(row) => self.frame_row(row, &visible, index, top, height),
                }
            })
            .collect();

        let footer = match &self.summary_config {
            Some(config) => {
                let displays: HashMap<String, String> =
                    summarize(&self.rows, config, &self.options.summary_placeholder)
                        .into_iter()
                        .map(|s| (s.column_key, s.display))
                        .collect();
                visible
                    .iter()
                    .zip(&widths)
                    .enumerate()
                    .map(|(i, (column, &width))| FooterCell {
                        column_key: column.key.clone(),
                        x: strip.x_of(i),
                        width,
                        display: displays.get(&column.key).cloned().unwrap_or_default(),
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        RenderFrame {
            total_width: strip.total_width(),
            total_height,
            item_count: items.len(),
            window,
            columns,
            items: frame_items,
            footer,
            editing: self.editor.session().cloned(),
            selected_count: self.selected.len(),
            viewport,
        }
    }

    fn frame_row(
        &self,
        row: &Row,
        visible: &[&Column],
        index: usize,
        top: f32,
        height: f32,
    ) -> FrameItem {
        let formatting = evaluate_row(&self.rules, row);
        let cells = visible
            .iter()
            .map(|column| FrameCell {
                column_key: column.key.clone(),
                display: render_cell(column, row),
                style: formatting.style_for(&column.key).cloned(),
                editing: self.editor.is_editing_cell(&row.id, &column.key),
            })
            .collect();
        FrameItem::Row {
            index,
            top,
            height,
            row_id: row.id.clone(),
            selected: self.selected.contains(&row.id),
            hovered: self.hover_row.as_deref() == Some(row.id.as_str()),
            row_style: formatting.row_style,
            cells,
        }
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
    use crate::types::ColumnType;

    fn grid() -> DataGrid {
        let mut grid = DataGrid::new(GridOptions::default());
        grid.set_columns(vec![
            Column::new("name", "Name", ColumnType::Text),
            Column::new("score", "Score", ColumnType::Formula),
            Column::new("email", "Email", ColumnType::Email),
        ]);
        grid.set_rows(vec![Row::new("r1").with_cell("name", CellValue::text("Ada"))]);
        grid
    }

    #[test]
    fn test_tab_skips_formula_column() {
        let mut grid = grid();
        assert!(grid.begin_edit("r1", "name").unwrap());
        grid.edit_input("Grace");
        assert!(grid.edit_key(EditKey::Tab));
        let session = grid.editor().session().unwrap();
        assert_eq!(session.column_key, "email");
        assert_eq!(grid.take_events().len(), 1);
    }

    #[test]
    fn test_new_rows_clear_hover_and_stale_edit() {
        let mut grid = grid();
        grid.set_hover_row(Some("r1"));
        grid.begin_edit("r1", "name").unwrap();
        grid.set_rows(vec![Row::new("r2")]);
        assert_eq!(grid.hover_row(), None);
        assert!(!grid.editor().is_editing());
    }

    #[test]
    fn test_scrolling_reuses_the_item_extent() {
        let mut grid = DataGrid::new(GridOptions {
            viewport_height: 360.0,
            ..GridOptions::default()
        });
        grid.set_columns(vec![Column::new("stage", "Stage", ColumnType::Text)]);
        grid.set_rows(
            (0..100)
                .map(|i| {
                    let stage = if i % 2 == 0 { "Won" } else { "Lost" };
                    Row::new(&format!("r{i}")).with_cell("stage", CellValue::text(stage))
                })
                .collect(),
        );
        grid.set_group_config(Some(GroupConfig::new("stage")));
        assert_eq!(grid.item_count(), 102);

        // rows dropped without telling the grid: a scroll must not regroup
        grid.rows.clear();
        grid.scroll_by(0.0, 1_000.0);
        assert_eq!(grid.item_count(), 102);
        assert_eq!(grid.total_height(), 102.0 * 36.0);
        assert_eq!(grid.viewport().scroll_y, 1_000.0);

        // collapsing a group rebuilds the extent from the current rows
        grid.toggle_group("Won");
        assert_eq!(grid.item_count(), 0);
        assert_eq!(grid.viewport().scroll_y, 0.0);
    }

    #[test]
    fn test_group_toggles_update_the_extent() {
        let mut grid = grid();
        grid.set_group_config(Some(GroupConfig::new("name")));
        assert_eq!(grid.item_count(), 2);
        grid.collapse_all();
        assert_eq!(grid.item_count(), 1);
        grid.expand_all();
        assert_eq!(grid.item_count(), 2);
        assert_eq!(grid.total_height(), 72.0);
    }

    #[test]
    fn test_hidden_columns_refuse_edit_and_resize() {
        let mut grid = grid();
        let mut columns = grid.columns().to_vec();
        columns[0].visible = false;
        grid.set_columns(columns);

        assert!(matches!(
            grid.begin_edit("r1", "name"),
            Err(GridError::UnknownColumn(_))
        ));
        assert!(!grid.editor().is_editing());
        assert!(matches!(
            grid.begin_column_resize("name", 0.0, CaptureGuard::noop()),
            Err(GridError::UnknownColumn(_))
        ));
        assert!(grid.column_layout().is_idle());
    }

    #[test]
    fn test_empty_grid_renders() {
        let frame = DataGrid::default().render();
        assert_eq!(frame.item_count, 0);
        assert!(frame.items.is_empty());
        assert!(frame.footer.is_empty());
    }
}
