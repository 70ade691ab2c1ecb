use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ReshapeError>;

/// Errors raised by the reshaping core.
///
/// Every error is local and fatal to the call that raised it; no operation
/// holds state across calls, so a failed transform cannot corrupt a later,
/// independent one.
#[derive(Debug, Error, PartialEq)]
pub enum ReshapeError {
    /// A requested column is absent from the input table or store.
    #[error("column not found: {0}")]
    MissingColumn(String),

    /// A column (or parallel sequence) breaks the equal-length invariant.
    #[error("'{name}' has length {actual}, expected {expected}")]
    ShapeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A configuration value is unusable before any data is touched.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A projection index points past the end of the store.
    #[error("row index {index} out of bounds for {row_count} rows")]
    RowOutOfBounds { index: usize, row_count: usize },

    /// A feed value could not be interpreted as a reference-zone date.
    #[error("column '{column}': cannot parse {value:?} as a date: {reason}")]
    DateParse {
        column: String,
        value: String,
        reason: String,
    },
}
