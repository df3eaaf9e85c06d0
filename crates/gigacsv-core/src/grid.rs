//! Rectangular grid of text cells with named columns.

use std::collections::BTreeSet;

use tracing::debug;

use crate::csv::{CsvTable, serialize};
use crate::error::{FormatError, IndexError, Result};

/// Position of a cell in the visible body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Header plus body, with every row exactly as wide as the header.
///
/// The grid only hands out shared borrows or copies of its contents, so the
/// width invariant can only be changed through its own operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Creates a grid from a header and a body.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::RowWidth`] for the first row whose width differs
    /// from the header's.
    pub fn new(
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> std::result::Result<Self, FormatError> {
        check_rectangular(&header, &rows)?;
        Ok(Self { header, rows })
    }

    /// Replaces the header and body wholesale.
    ///
    /// On error the grid is left as it was.
    pub fn load(
        &mut self,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> std::result::Result<(), FormatError> {
        *self = Self::new(header, rows)?;
        debug!(
            columns = self.column_count(),
            rows = self.row_count(),
            "grid loaded"
        );
        Ok(())
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the name of the column at `col`.
    pub fn column_name(&self, col: usize) -> std::result::Result<&str, IndexError> {
        self.check_column(col)?;
        Ok(&self.header[col])
    }

    /// Returns the text of a single cell.
    pub fn cell_at(&self, row: usize, col: usize) -> std::result::Result<&str, IndexError> {
        self.check_row(row)?;
        self.check_column(col)?;
        Ok(&self.rows[row][col])
    }

    /// Returns every cell of one column, top to bottom.
    pub fn column_cells(&self, col: usize) -> std::result::Result<Vec<&str>, IndexError> {
        self.check_column(col)?;
        Ok(self.rows.iter().map(|row| row[col].as_str()).collect())
    }

    /// Removes a column from the header and from every row.
    ///
    /// Returns the removed column name.
    pub fn delete_column(&mut self, col: usize) -> std::result::Result<String, IndexError> {
        self.check_column(col)?;
        let name = self.header.remove(col);
        for row in &mut self.rows {
            row.remove(col);
        }
        debug!(col, remaining = self.column_count(), "deleted column");
        Ok(name)
    }

    /// Removes the rows at `indexes`.
    ///
    /// Indexes refer to positions before the call; duplicates are ignored.
    /// Every index is checked before anything is removed. Returns the number
    /// of rows removed.
    pub fn delete_rows(&mut self, indexes: &[usize]) -> std::result::Result<usize, IndexError> {
        if let Some(&index) = indexes.iter().find(|&&index| index >= self.rows.len()) {
            return Err(IndexError::Row {
                index,
                len: self.rows.len(),
            });
        }

        let doomed: BTreeSet<usize> = indexes.iter().copied().collect();
        let mut position = 0;
        self.rows.retain(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });
        debug!(
            removed = doomed.len(),
            remaining = self.row_count(),
            "deleted rows"
        );
        Ok(doomed.len())
    }

    /// Serializes the header and body to CSV text.
    pub fn to_csv(&self) -> Result<String> {
        serialize(&self.header, &self.rows)
    }

    /// Swaps in a new body, returning the previous one.
    pub(crate) fn replace_rows(&mut self, rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
        debug_assert!(rows.iter().all(|row| row.len() == self.header.len()));
        std::mem::replace(&mut self.rows, rows)
    }

    fn check_row(&self, row: usize) -> std::result::Result<(), IndexError> {
        if row < self.rows.len() {
            Ok(())
        } else {
            Err(IndexError::Row {
                index: row,
                len: self.rows.len(),
            })
        }
    }

    fn check_column(&self, col: usize) -> std::result::Result<(), IndexError> {
        if col < self.header.len() {
            Ok(())
        } else {
            Err(IndexError::Column {
                index: col,
                len: self.header.len(),
            })
        }
    }
}

impl TryFrom<CsvTable> for Grid {
    type Error = FormatError;

    fn try_from(table: CsvTable) -> std::result::Result<Self, Self::Error> {
        Self::new(table.header, table.rows)
    }
}

fn check_rectangular(
    header: &[String],
    rows: &[Vec<String>],
) -> std::result::Result<(), FormatError> {
    match rows.iter().position(|row| row.len() != header.len()) {
        Some(row) => Err(FormatError::RowWidth {
            row,
            expected: header.len(),
            found: rows[row].len(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::new(
            vec!["id".into(), "name".into(), "city".into()],
            vec![
                vec!["1".into(), "foo".into(), "Oslo".into()],
                vec!["2".into(), "bar".into(), "Rome".into()],
                vec!["3".into(), "baz".into(), "Lima".into()],
                vec!["4".into(), "qux".into(), "Kyiv".into()],
            ],
        )
        .unwrap()
    }

    fn assert_rectangular(grid: &Grid) {
        for row in grid.rows() {
            assert_eq!(row.len(), grid.column_count());
        }
    }

    #[test]
    fn test_accessors() {
        let grid = sample();
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.cell_at(1, 2).unwrap(), "Rome");
        assert_eq!(grid.column_name(1).unwrap(), "name");
        assert_eq!(grid.column_cells(0).unwrap(), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_cell_at_out_of_range() {
        let grid = sample();
        assert_eq!(
            grid.cell_at(4, 0),
            Err(IndexError::Row { index: 4, len: 4 })
        );
        assert_eq!(
            grid.cell_at(0, 3),
            Err(IndexError::Column { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_delete_column() {
        let mut grid = sample();
        let name = grid.delete_column(1).unwrap();
        assert_eq!(name, "name");
        assert_eq!(grid.header(), ["id", "city"]);
        assert_eq!(grid.rows()[0], ["1", "Oslo"]);
        assert_rectangular(&grid);
    }

    #[test]
    fn test_delete_column_out_of_range_leaves_grid() {
        let mut grid = sample();
        let before = grid.clone();
        assert!(grid.delete_column(3).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_delete_rows_any_order() {
        let mut grid = sample();
        let removed = grid.delete_rows(&[0, 2]).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(grid.column_cells(0).unwrap(), vec!["2", "4"]);

        let mut grid = sample();
        grid.delete_rows(&[3, 1, 3]).unwrap();
        assert_eq!(grid.column_cells(0).unwrap(), vec!["1", "3"]);
        assert_rectangular(&grid);
    }

    #[test]
    fn test_delete_rows_validates_before_removing() {
        let mut grid = sample();
        let before = grid.clone();
        assert_eq!(
            grid.delete_rows(&[0, 9]),
            Err(IndexError::Row { index: 9, len: 4 })
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_delete_every_column_keeps_rows() {
        let mut grid = sample();
        for _ in 0..3 {
            grid.delete_column(0).unwrap();
        }
        assert_eq!(grid.column_count(), 0);
        assert_eq!(grid.row_count(), 4);
        assert_rectangular(&grid);
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = Grid::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "2".into()], vec!["3".into()]],
        );
        assert_eq!(
            result,
            Err(FormatError::RowWidth {
                row: 1,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_load_rejects_ragged_rows_and_keeps_grid() {
        let mut grid = sample();
        let before = grid.clone();
        let result = grid.load(vec!["a".into(), "b".into()], vec![vec!["1".into()]]);
        assert!(result.is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_try_from_ragged_table() {
        let table = CsvTable::new(vec!["a".into()], vec![vec!["1".into(), "2".into()]]);
        assert!(Grid::try_from(table).is_err());
    }

    #[test]
    fn test_delete_rows_keeps_order_of_survivors() {
        let mut grid = sample();
        assert_eq!(grid.delete_rows(&[1, 2]).unwrap(), 2);
        assert_eq!(grid.column_cells(0).unwrap(), vec!["1", "4"]);
    }
}
