//! One open document: grid, filter overlay, and search cursor.
//!
//! The session is the only place the three pieces meet, so it owns the
//! invalidation rules between them:
//!
//! - loading a grid drops the filter and the search cache
//! - deleting rows or a column drops the search cache
//! - any filter change that renumbers visible rows drops the search cache

use tracing::debug;

use crate::csv::{CsvTable, parse};
use crate::error::Result;
use crate::filter::{FilterOutcome, FilterOverlay};
use crate::grid::{CellPosition, Grid};
use crate::search::SearchCursor;

/// Label for the row-removal action while unfiltered.
pub const DELETE_ROWS_LABEL: &str = "Delete rows";
/// Label for the row-removal action while filtered.
pub const HIDE_ROWS_LABEL: &str = "Hide rows";

#[derive(Debug, Clone, Default)]
pub struct Session {
    grid: Grid,
    filter: FilterOverlay,
    cursor: SearchCursor,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session from CSV text.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut session = Self::new();
        session.open(text)?;
        Ok(session)
    }

    /// Parses `text` and, only if it is valid, replaces the current grid.
    pub fn open(&mut self, text: &str) -> Result<()> {
        let table = parse(text)?;
        self.load_table(table)
    }

    /// Replaces the grid wholesale with the contents of `table`.
    pub fn load_table(&mut self, table: CsvTable) -> Result<()> {
        self.load(table.header, table.rows)
    }

    /// Replaces the grid wholesale, dropping any filter and search state.
    ///
    /// A body row narrower or wider than the header is rejected with
    /// [`FormatError::RowWidth`](crate::FormatError::RowWidth) and the
    /// session is left untouched.
    pub fn load(&mut self, header: Vec<String>, rows: Vec<Vec<String>>) -> Result<()> {
        self.grid.load(header, rows)?;
        self.filter.reset();
        self.cursor.invalidate();
        Ok(())
    }

    /// Read access to the visible grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn header(&self) -> &[String] {
        self.grid.header()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        self.grid.rows()
    }

    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.grid.column_count()
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&str> {
        Ok(self.grid.cell_at(row, col)?)
    }

    pub fn column_cells(&self, col: usize) -> Result<Vec<&str>> {
        Ok(self.grid.column_cells(col)?)
    }

    /// Deletes a column from the header and every row.
    ///
    /// While filtered, the column is also removed from the pre-filter
    /// snapshot so restored rows stay as wide as the header.
    pub fn delete_column(&mut self, col: usize) -> Result<String> {
        let name = self.grid.delete_column(col)?;
        self.filter.remove_saved_column(col);
        self.cursor.invalidate();
        Ok(name)
    }

    /// Deletes rows of the visible body.
    ///
    /// While filtered this only hides them: the pre-filter snapshot is left
    /// alone and clearing the filter brings the rows back.
    pub fn delete_rows(&mut self, indexes: &[usize]) -> Result<usize> {
        let removed = self.grid.delete_rows(indexes)?;
        if self.filter.is_filtered() {
            debug!(removed, "rows hidden from filtered view");
        }
        self.cursor.invalidate();
        Ok(removed)
    }

    /// Filters the visible body by substring; blank text clears the filter.
    pub fn apply_filter(&mut self, text: &str) -> FilterOutcome {
        let outcome = self.filter.apply(&mut self.grid, text);
        if outcome.renumbers_rows() {
            self.cursor.invalidate();
        }
        outcome
    }

    /// Restores the unfiltered body.
    pub fn clear_filter(&mut self) -> FilterOutcome {
        let outcome = self.filter.clear(&mut self.grid);
        if outcome.renumbers_rows() {
            self.cursor.invalidate();
        }
        outcome
    }

    pub fn is_filtered(&self) -> bool {
        self.filter.is_filtered()
    }

    pub fn filter_text(&self) -> Option<&str> {
        self.filter.predicate()
    }

    /// Finds the next cell of the visible body containing `text`.
    pub fn search(&mut self, text: &str) -> Option<CellPosition> {
        self.cursor.search(&self.grid, text)
    }

    pub fn last_match(&self) -> Option<CellPosition> {
        self.cursor.last_match()
    }

    /// Label for the row-removal action in the current filter state.
    pub fn row_action_label(&self) -> &'static str {
        if self.is_filtered() {
            HIDE_ROWS_LABEL
        } else {
            DELETE_ROWS_LABEL
        }
    }

    /// Serializes the header and visible body.
    pub fn to_csv(&self) -> Result<String> {
        self.grid.to_csv()
    }
}
