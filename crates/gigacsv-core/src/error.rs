//! Error types for the grid engine.

use thiserror::Error;

/// Malformed CSV text rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The text contains no header record.
    #[error("CSV text is empty")]
    Empty,

    /// A quoted field was still open when the text ended.
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    /// A data record has a different number of fields than the header.
    #[error("record {record} on line {line} has {found} fields, expected {expected}")]
    FieldCount {
        record: usize,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A body row handed in directly has a different width than the header.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Out-of-range row or column reference.
///
/// Indicates the caller held a stale index; nothing is mutated when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("row {index} out of range (grid has {len} rows)")]
    Row { index: usize, len: usize },

    #[error("column {index} out of range (grid has {len} columns)")]
    Column { index: usize, len: usize },
}

/// Errors that can occur during grid operations.
#[derive(Debug, Error)]
pub enum GridError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Index(#[from] IndexError),

    /// Failed to write CSV output.
    #[error("failed to serialize CSV: {message}")]
    Serialize { message: String },
}

impl From<::csv::Error> for GridError {
    fn from(err: ::csv::Error) -> Self {
        Self::Serialize {
            message: err.to_string(),
        }
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
