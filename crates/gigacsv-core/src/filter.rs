//! Non-destructive row filter over a [`Grid`].
//!
//! Entering the filtered state moves the full body into a snapshot and
//! leaves only matching rows visible. Every later filter text is matched
//! against that snapshot, never against the current subset, and clearing
//! the filter puts the snapshot back.
//!
//! Only [`Session`](crate::Session) drives the overlay, so structural edits
//! made while filtered are applied to the snapshot too.

use tracing::debug;

use crate::grid::Grid;

/// Whether a filter is active, and the body it was applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum FilterState {
    #[default]
    Unfiltered,
    Filtered {
        /// Full body as it was when filtering began.
        saved: Vec<Vec<String>>,
        /// Text of the most recent non-blank filter.
        predicate: String,
    },
}

/// What a filter call did to the visible body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Nothing changed (blank text while unfiltered).
    Unchanged,
    /// Snapshot taken and the body narrowed.
    Entered,
    /// Body re-derived from the existing snapshot.
    Refiltered,
    /// Snapshot restored and discarded.
    Cleared,
}

impl FilterOutcome {
    /// Returns true if visible row indexes may have been renumbered.
    pub fn renumbers_rows(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Two-state filter overlay.
#[derive(Debug, Clone, Default)]
pub struct FilterOverlay {
    state: FilterState,
}

impl FilterOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self.state, FilterState::Filtered { .. })
    }

    /// Returns the active filter text, if any.
    pub fn predicate(&self) -> Option<&str> {
        match &self.state {
            FilterState::Filtered { predicate, .. } => Some(predicate),
            FilterState::Unfiltered => None,
        }
    }

    /// Shows only the rows of the pre-filter body that contain `text`.
    ///
    /// Blank text clears the filter instead.
    pub(crate) fn apply(&mut self, grid: &mut Grid, text: &str) -> FilterOutcome {
        if is_blank(text) {
            return self.clear(grid);
        }

        let (saved, outcome) = match std::mem::take(&mut self.state) {
            FilterState::Unfiltered => (grid.replace_rows(Vec::new()), FilterOutcome::Entered),
            FilterState::Filtered { saved, .. } => (saved, FilterOutcome::Refiltered),
        };

        let visible: Vec<Vec<String>> = saved
            .iter()
            .filter(|row| row_matches(row, text))
            .cloned()
            .collect();
        debug!(
            ?outcome,
            visible = visible.len(),
            total = saved.len(),
            "applied filter"
        );
        grid.replace_rows(visible);
        self.state = FilterState::Filtered {
            saved,
            predicate: text.to_string(),
        };
        outcome
    }

    /// Restores the pre-filter body and leaves the filtered state.
    pub(crate) fn clear(&mut self, grid: &mut Grid) -> FilterOutcome {
        match std::mem::take(&mut self.state) {
            FilterState::Unfiltered => FilterOutcome::Unchanged,
            FilterState::Filtered { saved, .. } => {
                debug!(restored = saved.len(), "cleared filter");
                grid.replace_rows(saved);
                FilterOutcome::Cleared
            }
        }
    }

    /// Drops the filter without restoring anything.
    ///
    /// Used when the grid underneath is replaced wholesale.
    pub(crate) fn reset(&mut self) {
        self.state = FilterState::Unfiltered;
    }

    /// Removes a column from the snapshot so restored rows match the header.
    ///
    /// The caller has already removed `col` from the visible grid.
    pub(crate) fn remove_saved_column(&mut self, col: usize) {
        if let FilterState::Filtered { saved, .. } = &mut self.state {
            for row in saved.iter_mut() {
                row.remove(col);
            }
        }
    }
}

/// Returns true if any cell of `row` contains `text` (case-sensitive).
pub fn row_matches(row: &[String], text: &str) -> bool {
    row.iter().any(|cell| cell.contains(text))
}

/// Returns true for text that is empty or only whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(
            vec!["id".into(), "name".into()],
            vec![
                vec!["1".into(), "abc".into()],
                vec!["2".into(), "abd".into()],
                vec!["3".into(), "xyz".into()],
                vec!["4".into(), "ABC".into()],
            ],
        )
        .unwrap()
    }

    fn ids(grid: &Grid) -> Vec<&str> {
        grid.column_cells(0).unwrap()
    }

    #[test]
    fn test_apply_enters_filtered_state() {
        let mut grid = grid();
        let mut overlay = FilterOverlay::new();
        assert_eq!(overlay.apply(&mut grid, "abc"), FilterOutcome::Entered);
        assert!(overlay.is_filtered());
        assert_eq!(overlay.predicate(), Some("abc"));
        assert_eq!(ids(&grid), vec!["1"]);
        assert!(matches!(
            &overlay.state,
            FilterState::Filtered { saved, .. } if saved.len() == 4
        ));
    }

    #[test]
    fn test_refilter_is_not_cumulative() {
        let mut grid = grid();
        let mut overlay = FilterOverlay::new();
        overlay.apply(&mut grid, "abc");
        assert_eq!(overlay.apply(&mut grid, "ab"), FilterOutcome::Refiltered);
        assert_eq!(ids(&grid), vec!["1", "2"]);
    }

    #[test]
    fn test_blank_text_restores_body() {
        let mut grid = grid();
        let before = grid.clone();
        let mut overlay = FilterOverlay::new();
        overlay.apply(&mut grid, "x");
        assert_eq!(overlay.apply(&mut grid, "   "), FilterOutcome::Cleared);
        assert!(!overlay.is_filtered());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_blank_text_while_unfiltered_is_noop() {
        let mut grid = grid();
        let mut overlay = FilterOverlay::new();
        assert_eq!(overlay.apply(&mut grid, ""), FilterOutcome::Unchanged);
        assert_eq!(grid.row_count(), 4);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let mut grid = grid();
        let mut overlay = FilterOverlay::new();
        overlay.apply(&mut grid, "ABC");
        assert_eq!(ids(&grid), vec!["4"]);
    }

    #[test]
    fn test_no_match_leaves_empty_body() {
        let mut grid = grid();
        let mut overlay = FilterOverlay::new();
        overlay.apply(&mut grid, "nothing");
        assert!(grid.is_empty());
        overlay.clear(&mut grid);
        assert_eq!(grid.row_count(), 4);
    }
}
