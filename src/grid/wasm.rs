//! JavaScript surface of the grid.
//!
//! `LeadGrid` wraps a [`DataGrid`] in shared state so document listeners
//! installed for header gestures can reach it. Events are delivered to the
//! registered callback after every mutating call, with no borrow held.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use wasm_bindgen::prelude::*;

use super::DataGrid;
use crate::cell::EditKey;
use crate::config::GridOptions;
use crate::layout::capture_document_pointer;
use crate::types::{CellValue, Column, FormattingRule, GridSnapshot, GroupConfig, Row, SummaryConfig};

struct SharedState {
    grid: DataGrid,
    event_callback: Option<Function>,
    render_callback: Option<Function>,
}

/// Deliver queued events, then ask the host to redraw.
fn flush(state: &Rc<RefCell<SharedState>>) {
    let (events, on_event, on_render) = {
        let mut s = state.borrow_mut();
        (
            s.grid.take_events(),
            s.event_callback.clone(),
            s.render_callback.clone(),
        )
    };
    if let Some(callback) = on_event {
        for event in events {
            match serde_wasm_bindgen::to_value(&event) {
                Ok(value) => {
                    let _ = callback.call1(&JsValue::NULL, &value);
                }
                Err(e) => log::warn!("dropping event {event:?}: {e}"),
            }
        }
    }
    if let Some(callback) = on_render {
        let _ = callback.call0(&JsValue::NULL);
    }
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}

fn optional_from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<Option<T>, JsValue> {
    if value.is_null() || value.is_undefined() {
        Ok(None)
    } else {
        from_js(value).map(Some)
    }
}

/// The grid exported to JavaScript.
#[wasm_bindgen]
pub struct LeadGrid {
    state: Rc<RefCell<SharedState>>,
}

#[wasm_bindgen]
impl LeadGrid {
    /// Create a grid. `options` may be omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<LeadGrid, JsValue> {
        console_error_panic_hook::set_once();
        let options: GridOptions = optional_from_js(options)?.unwrap_or_default();
        Ok(LeadGrid {
            state: Rc::new(RefCell::new(SharedState {
                grid: DataGrid::new(options),
                event_callback: None,
                render_callback: None,
            })),
        })
    }

    /// Replace every input from a snapshot object.
    pub fn load(&mut self, snapshot: JsValue) -> Result<(), JsValue> {
        let snapshot: GridSnapshot = from_js(snapshot)?;
        self.state.borrow_mut().grid.load_snapshot(snapshot);
        flush(&self.state);
        Ok(())
    }

    /// Replace every input from snapshot JSON.
    #[wasm_bindgen(js_name = "loadJson")]
    pub fn load_json(&mut self, json: &str) -> Result<(), JsValue> {
        let snapshot = GridSnapshot::from_json(json)?;
        self.state.borrow_mut().grid.load_snapshot(snapshot);
        flush(&self.state);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setColumns")]
    pub fn set_columns(&mut self, columns: JsValue) -> Result<(), JsValue> {
        let columns: Vec<Column> = from_js(columns)?;
        self.state.borrow_mut().grid.set_columns(columns);
        flush(&self.state);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setRows")]
    pub fn set_rows(&mut self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<Row> = from_js(rows)?;
        self.state.borrow_mut().grid.set_rows(rows);
        flush(&self.state);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setRules")]
    pub fn set_rules(&mut self, rules: JsValue) -> Result<(), JsValue> {
        let rules: Vec<FormattingRule> = from_js(rules)?;
        self.state.borrow_mut().grid.set_rules(rules);
        flush(&self.state);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setGroupConfig")]
    pub fn set_group_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: Option<GroupConfig> = optional_from_js(config)?;
        self.state.borrow_mut().grid.set_group_config(config);
        flush(&self.state);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setSummaryConfig")]
    pub fn set_summary_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: Option<SummaryConfig> = optional_from_js(config)?;
        self.state.borrow_mut().grid.set_summary_config(config);
        flush(&self.state);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setColumnOrder")]
    pub fn set_column_order(&mut self, order: Option<Vec<String>>) {
        self.state.borrow_mut().grid.set_column_order(order);
        flush(&self.state);
    }

    #[wasm_bindgen(js_name = "setSelectedRowIds")]
    pub fn set_selected_row_ids(&mut self, ids: Vec<String>) {
        self.state.borrow_mut().grid.set_selected_row_ids(ids);
        flush(&self.state);
    }

    #[wasm_bindgen(js_name = "updateCell")]
    pub fn update_cell(&mut self, row_id: &str, column_key: &str, cell: JsValue) -> Result<(), JsValue> {
        let cell: CellValue = from_js(cell)?;
        self.state
            .borrow_mut()
            .grid
            .update_cell(row_id, column_key, cell)?;
        flush(&self.state);
        Ok(())
    }

    /// Build the current frame.
    pub fn render(&self) -> Result<JsValue, JsValue> {
        let frame = self.state.borrow().grid.render();
        Ok(serde_wasm_bindgen::to_value(&frame)?)
    }

    // ---- Scrolling ----

    pub fn scroll(&mut self, delta_x: f32, delta_y: f32) {
        self.state.borrow_mut().grid.scroll_by(delta_x, delta_y);
        flush(&self.state);
    }

    #[wasm_bindgen(js_name = "setScroll")]
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.state.borrow_mut().grid.set_scroll(x, y);
        flush(&self.state);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.borrow_mut().grid.resize(width, height);
        flush(&self.state);
    }

    #[wasm_bindgen(js_name = "scrollToRow")]
    pub fn scroll_to_row(&mut self, row_id: &str) -> bool {
        let moved = self.state.borrow_mut().grid.scroll_to_row(row_id);
        if moved {
            flush(&self.state);
        }
        moved
    }

    // ---- Groups ----

    #[wasm_bindgen(js_name = "toggleGroup")]
    pub fn toggle_group(&mut self, group_key: &str) -> bool {
        let collapsed = self.state.borrow_mut().grid.toggle_group(group_key);
        flush(&self.state);
        collapsed
    }

    #[wasm_bindgen(js_name = "collapseAll")]
    pub fn collapse_all(&mut self) {
        self.state.borrow_mut().grid.collapse_all();
        flush(&self.state);
    }

    #[wasm_bindgen(js_name = "expandAll")]
    pub fn expand_all(&mut self) {
        self.state.borrow_mut().grid.expand_all();
        flush(&self.state);
    }

    // ---- Header gestures ----

    /// Pointer pressed on a header. Document listeners follow the pointer
    /// until release; `header_left` is the header's client x offset.
    #[wasm_bindgen(js_name = "beginColumnDrag")]
    pub fn begin_column_drag(&mut self, index: usize, header_left: f32) -> Result<(), JsValue> {
        let on_move = weak_handler(&self.state, move |grid, x| {
            grid.column_drag_over(x - header_left);
        });
        let on_up = weak_handler(&self.state, |grid, _| {
            grid.end_column_drag();
        });
        let capture = capture_document_pointer(on_move, on_up);
        self.state
            .borrow_mut()
            .grid
            .begin_column_drag(index, capture)?;
        flush(&self.state);
        Ok(())
    }

    /// Pointer pressed on a header's resize handle at client x `start_x`.
    #[wasm_bindgen(js_name = "beginColumnResize")]
    pub fn begin_column_resize(&mut self, column_id: &str, start_x: f32) -> Result<(), JsValue> {
        let on_move = weak_handler(&self.state, |grid, x| {
            grid.resize_column_to(x);
        });
        let on_up = weak_handler(&self.state, |grid, _| {
            grid.end_column_resize();
        });
        let capture = capture_document_pointer(on_move, on_up);
        self.state
            .borrow_mut()
            .grid
            .begin_column_resize(column_id, start_x, capture)?;
        flush(&self.state);
        Ok(())
    }

    // ---- Outbound requests ----

    #[wasm_bindgen(js_name = "clickHeader")]
    pub fn click_header(&mut self, column_id: &str) -> Result<(), JsValue> {
        self.state.borrow_mut().grid.click_header(column_id)?;
        flush(&self.state);
        Ok(())
    }

    #[wasm_bindgen(js_name = "requestAddColumn")]
    pub fn request_add_column(&mut self) {
        self.state.borrow_mut().grid.request_add_column();
        flush(&self.state);
    }

    #[wasm_bindgen(js_name = "toggleRowSelection")]
    pub fn toggle_row_selection(&mut self, row_id: &str) -> Result<bool, JsValue> {
        let selected = self.state.borrow_mut().grid.toggle_row_selection(row_id)?;
        flush(&self.state);
        Ok(selected)
    }

    #[wasm_bindgen(js_name = "setHoverRow")]
    pub fn set_hover_row(&mut self, row_id: Option<String>) {
        self.state
            .borrow_mut()
            .grid
            .set_hover_row(row_id.as_deref());
        flush(&self.state);
    }

    #[wasm_bindgen(js_name = "requestEnrichment")]
    pub fn request_enrichment(&mut self, row_id: &str, column_id: &str) -> Result<bool, JsValue> {
        let requested = self
            .state
            .borrow_mut()
            .grid
            .request_enrichment(row_id, column_id)?;
        flush(&self.state);
        Ok(requested)
    }

    // ---- Inline editing ----

    #[wasm_bindgen(js_name = "beginEdit")]
    pub fn begin_edit(&mut self, row_id: &str, column_key: &str) -> Result<bool, JsValue> {
        let editing = self.state.borrow_mut().grid.begin_edit(row_id, column_key)?;
        flush(&self.state);
        Ok(editing)
    }

    #[wasm_bindgen(js_name = "editInput")]
    pub fn edit_input(&mut self, text: &str) {
        self.state.borrow_mut().grid.edit_input(text);
    }

    /// Forward a `KeyboardEvent.key`. Returns true if the key ended the edit,
    /// so the host can prevent the default action.
    #[wasm_bindgen(js_name = "editKey")]
    pub fn edit_key(&mut self, key: &str) -> bool {
        let handled = self
            .state
            .borrow_mut()
            .grid
            .edit_key(EditKey::from_key(key));
        if handled {
            flush(&self.state);
        }
        handled
    }

    #[wasm_bindgen(js_name = "blurEdit")]
    pub fn blur_edit(&mut self) {
        let handled = self.state.borrow_mut().grid.blur_edit();
        if handled {
            flush(&self.state);
        }
    }

    #[wasm_bindgen(js_name = "cancelEdit")]
    pub fn cancel_edit(&mut self) {
        self.state.borrow_mut().grid.cancel_edit();
        flush(&self.state);
    }

    #[wasm_bindgen(js_name = "resetInteraction")]
    pub fn reset_interaction(&mut self) {
        self.state.borrow_mut().grid.reset_interaction();
        flush(&self.state);
    }

    // ---- Callbacks ----

    /// Register the callback receiving outbound events.
    #[wasm_bindgen(js_name = "setEventCallback")]
    pub fn set_event_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().event_callback = callback;
    }

    /// Register the callback invoked whenever the frame may have changed.
    #[wasm_bindgen(js_name = "setRenderCallback")]
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }
}

/// Pointer callback reaching the grid through a weak reference, so the
/// capture stored inside the grid does not keep it alive.
fn weak_handler(
    state: &Rc<RefCell<SharedState>>,
    mut apply: impl FnMut(&mut DataGrid, f32) + 'static,
) -> impl FnMut(f32) + 'static {
    let weak: Weak<RefCell<SharedState>> = Rc::downgrade(state);
    move |x| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let Ok(mut s) = state.try_borrow_mut() else {
            return;
        };
        apply(&mut s.grid, x);
        drop(s);
        flush(&state);
    }
}
