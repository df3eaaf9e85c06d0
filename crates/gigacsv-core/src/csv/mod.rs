//! CSV text codec.
//!
//! Parsing is strict about structure (every record must match the header
//! width, quoted fields must be closed) and never trims or reinterprets cell
//! text, so that `parse(serialize(header, rows))` gives back the same grid.

mod reader;
mod writer;

pub use reader::parse;
pub use writer::serialize;

/// Header and body produced by [`parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    /// Column names from the first record.
    pub header: Vec<String>,
    /// Data records, each exactly `header.len()` cells wide.
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Creates a table from an already rectangular header and body.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Serializes the table back to CSV text.
    pub fn to_csv(&self) -> crate::Result<String> {
        serialize(&self.header, &self.rows)
    }
}
