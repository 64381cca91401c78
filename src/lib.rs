//! leadgrid - data-grid engine for CRM lead tables
//!
//! Turns columns, rows and view configuration into render frames for the web
//! via WebAssembly:
//! - Column ordering with persisted key order, drag reorder and resize
//! - Windowed rows (tens of thousands of rows at constant cost per scroll)
//! - Single-level grouping with collapsible group headers
//! - Conditional formatting at cell and row scope
//! - Footer summaries per column
//! - Per-type cell display and inline editing
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { LeadGrid } from 'leadgrid';
//! await init();
//! const grid = new LeadGrid({ rowHeight: 36 });
//! grid.setEventCallback((event) => dataLayer.handle(event));
//! grid.load(snapshot);
//! draw(grid.render());
//! ```

pub mod cell;
pub mod conditional;
pub mod config;
pub mod error;
pub mod grid;
pub mod grouping;
pub mod layout;
pub mod numeric;
pub mod summary;
pub mod types;

use wasm_bindgen::prelude::*;

pub use config::GridOptions;
pub use error::{GridError, Result};
pub use grid::{DataGrid, RenderFrame};
#[cfg(target_arch = "wasm32")]
pub use grid::LeadGrid;

pub use types::*;

/// Render a JSON snapshot and return the frame as JSON.
///
/// # Errors
/// Returns an error if the snapshot JSON is invalid.
#[wasm_bindgen]
pub fn render_snapshot_json(json: &str) -> std::result::Result<String, JsValue> {
    let grid = DataGrid::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&grid.render())
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
