//! In-memory CSV grid engine.
//!
//! This crate holds a rectangular grid of text cells with named columns and
//! the operations a table viewer needs on top of it.
//!
//! # Features
//!
//! - **CSV codec**: strict RFC 4180 parsing and minimal-quoting serialization
//!   that round-trip each other
//! - **Grid**: header plus body with row and column deletion that keeps
//!   every row as wide as the header
//! - **Filter overlay**: hide non-matching rows and restore them later
//! - **Search cursor**: resumable substring search in row-major order
//! - **Session**: ties the above together and owns cache invalidation
//!
//! # Example
//!
//! ```
//! use gigacsv_core::{CellPosition, Session};
//!
//! let mut session = Session::from_csv("id,name\n1,foo\n2,bar\n3,foobar\n")?;
//! assert_eq!(session.search("foo"), Some(CellPosition::new(0, 1)));
//! assert_eq!(session.search("foo"), Some(CellPosition::new(2, 1)));
//!
//! session.apply_filter("foo");
//! assert_eq!(session.row_count(), 2);
//!
//! session.apply_filter("");
//! assert_eq!(session.row_count(), 3);
//! # Ok::<(), gigacsv_core::GridError>(())
//! ```

pub mod csv;
mod error;
pub mod filter;
pub mod grid;
pub mod search;
mod session;

// === Error Types ===
pub use error::{FormatError, GridError, IndexError, Result};

// === Codec ===
pub use crate::csv::{CsvTable, parse, serialize};

// === Grid State ===
pub use filter::{FilterOutcome, FilterOverlay};
pub use grid::{CellPosition, Grid};
pub use search::SearchCursor;
pub use session::{DELETE_ROWS_LABEL, HIDE_ROWS_LABEL, Session};
