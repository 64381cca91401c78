//! Structured error types for leadgrid.
//!
//! The transforms themselves are total; errors only arise at the boundary,
//! when decoding caller input or addressing a row/column that does not exist.

/// All errors that can occur while feeding or driving the grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Snapshot, options or row payload could not be decoded.
    #[error("JSON decoding: {0}")]
    Json(#[from] serde_json::Error),

    /// A column id or key that is not part of the current column set.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A row id that is not part of the current row set.
    #[error("Unknown row: {0}")]
    UnknownRow(String),

    /// Reorder positions outside the visible column range.
    #[error("Invalid column move {from} -> {to} over {len} columns")]
    InvalidMove { from: usize, to: usize, len: usize },

    /// I/O error (CLI only).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = GridError::InvalidMove {
            from: 4,
            to: 0,
            len: 3,
        };
        assert_eq!(err.to_string(), "Invalid column move 4 -> 0 over 3 columns");
        assert_eq!(
            GridError::UnknownRow("r9".into()).to_string(),
            "Unknown row: r9"
        );
    }

    #[test]
    fn test_json_errors_convert() {
        let err: GridError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, GridError::Json(_)));
        assert!(err.to_string().starts_with("JSON decoding:"));
    }
}
