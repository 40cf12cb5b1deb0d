//! Error types for table validation.

use thiserror::Error;

/// Error raised when a table's rows do not agree with its declared headers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Two headers declare the same key
    #[error("Duplicate header key: {0}")]
    DuplicateHeader(String),
    /// A row holds a cell under a key no header declares
    #[error("Row {row} has undeclared key '{key}'")]
    UndeclaredKey {
        /// Row index (0-based)
        row: usize,
        /// Offending key
        key: String,
    },
}
