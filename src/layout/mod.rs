//! Layout engine for columns and the scrolling body.
//!
//! This module handles:
//! - Column ordering, geometry and the header reorder/resize gestures
//! - Scoped pointer capture for those gestures
//! - Windowed materialization of the body items
//! - Scroll position management

mod capture;
mod columns;
mod viewport;
mod virtualizer;

#[cfg(target_arch = "wasm32")]
pub use capture::capture_document_pointer;
pub use capture::CaptureGuard;
pub use columns::{reorder_keys, visible_columns, ColumnLayout, ColumnStrip, Gesture};
pub use viewport::Viewport;
pub use virtualizer::{ItemOffsets, VirtualWindow, Virtualizer};
