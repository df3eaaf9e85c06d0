//! Resumable substring search in row-major order.

use tracing::debug;

use crate::filter::is_blank;
use crate::grid::{CellPosition, Grid};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedMatch {
    position: CellPosition,
    text: String,
}

/// Remembers the last match so that repeating a search moves forward.
///
/// The scan never wraps around: once the last match in the grid has been
/// returned, repeating the same text keeps returning `None` until the cache
/// is invalidated or the text changes.
#[derive(Debug, Clone, Default)]
pub struct SearchCursor {
    cache: Option<CachedMatch>,
}

impl SearchCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the next cell containing `text`.
    ///
    /// Starts right after the cached match when `text` is the text that
    /// produced it, otherwise at the first cell. Blank text never matches.
    pub fn search(&mut self, grid: &Grid, text: &str) -> Option<CellPosition> {
        if is_blank(text) {
            return None;
        }

        let resume = self
            .cache
            .as_ref()
            .filter(|cached| cached.text == text)
            .map(|cached| next_cell(cached.position, grid.column_count()));
        let start = match resume {
            Some(position) => position,
            None => {
                self.invalidate();
                CellPosition::default()
            }
        };

        let found = find_from(grid, text, start)?;
        debug!(row = found.row, col = found.col, "search hit");
        self.cache = Some(CachedMatch {
            position: found,
            text: text.to_string(),
        });
        Some(found)
    }

    /// Forgets the cached match.
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            debug!("search cache invalidated");
        }
    }

    /// Position of the last successful match, if still valid.
    pub fn last_match(&self) -> Option<CellPosition> {
        self.cache.as_ref().map(|cached| cached.position)
    }

}

/// Scans from `start` (inclusive) to the end of the grid.
pub fn find_from(grid: &Grid, text: &str, start: CellPosition) -> Option<CellPosition> {
    grid.rows()
        .iter()
        .enumerate()
        .skip(start.row)
        .find_map(|(row_idx, row)| {
            let first_col = if row_idx == start.row { start.col } else { 0 };
            row.iter()
                .enumerate()
                .skip(first_col)
                .find(|(_, cell)| cell.contains(text))
                .map(|(col, _)| CellPosition::new(row_idx, col))
        })
}

fn next_cell(position: CellPosition, width: usize) -> CellPosition {
    if position.col + 1 < width {
        CellPosition::new(position.row, position.col + 1)
    } else {
        CellPosition::new(position.row + 1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                vec!["x".into(), "hit".into(), "hit".into()],
                vec!["none".into(), "nope".into(), "x".into()],
                vec!["hit".into(), "x".into(), "x".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_resumes_across_columns_and_rows() {
        let grid = grid();
        let mut cursor = SearchCursor::new();
        assert_eq!(cursor.search(&grid, "hit"), Some(CellPosition::new(0, 1)));
        assert_eq!(cursor.search(&grid, "hit"), Some(CellPosition::new(0, 2)));
        assert_eq!(cursor.search(&grid, "hit"), Some(CellPosition::new(2, 0)));
        assert_eq!(cursor.search(&grid, "hit"), None);
        // No wraparound, and the miss keeps the cache
        assert_eq!(cursor.last_match(), Some(CellPosition::new(2, 0)));
        assert_eq!(cursor.search(&grid, "hit"), None);
    }

    #[test]
    fn test_new_text_restarts_from_origin() {
        let grid = grid();
        let mut cursor = SearchCursor::new();
        cursor.search(&grid, "hit");
        cursor.search(&grid, "hit");
        assert_eq!(cursor.search(&grid, "x"), Some(CellPosition::new(0, 0)));
        assert_eq!(cursor.cache.as_ref().map(|c| c.text.as_str()), Some("x"));
    }

    #[test]
    fn test_new_text_without_match_drops_cache() {
        let grid = grid();
        let mut cursor = SearchCursor::new();
        cursor.search(&grid, "hit");
        assert_eq!(cursor.search(&grid, "zzz"), None);
        assert_eq!(cursor.last_match(), None);
        assert_eq!(cursor.search(&grid, "hit"), Some(CellPosition::new(0, 1)));
    }

    #[test]
    fn test_blank_text_keeps_cache() {
        let grid = grid();
        let mut cursor = SearchCursor::new();
        cursor.search(&grid, "hit");
        assert_eq!(cursor.search(&grid, " "), None);
        assert_eq!(cursor.search(&grid, "hit"), Some(CellPosition::new(0, 2)));
    }

    #[test]
    fn test_invalidate_restarts_scan() {
        let grid = grid();
        let mut cursor = SearchCursor::new();
        cursor.search(&grid, "hit");
        cursor.invalidate();
        assert_eq!(cursor.search(&grid, "hit"), Some(CellPosition::new(0, 1)));
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::default();
        let mut cursor = SearchCursor::new();
        assert_eq!(cursor.search(&grid, "a"), None);
    }
}
