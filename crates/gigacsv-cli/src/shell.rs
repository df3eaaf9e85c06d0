//! Line-oriented front end: one user action per line.
//!
//! Parsing a line into an [`Action`] is pure; [`Shell`] only forwards each
//! action to the session and prints what happened. Failed actions print an
//! error and leave the session as it was.

use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use gigacsv_core::{FilterOutcome, IndexError, Session};
use thiserror::Error;
use tracing::{debug, trace};

use crate::files::{reopen_session, save_session, with_csv_extension};
use crate::logging::redact_value;
use crate::render::{RenderOptions, grid_table, row_label};
use crate::settings::Settings;

pub const HELP: &str = "\
commands:
  search <text>          find the next cell containing <text>
  filter [<text>]        show only rows containing <text>; no text clears
  clear                  remove the filter
  delete-rows <list>     delete (or hide, while filtered) rows, e.g. 0,2,5-7
  delete-column <col>    delete a column
  cell <row> <col>       print one cell
  column <col>           print every cell of a column
  show [<limit>]         print the grid
  rows                   print the row count
  open <path>            load another file
  save [<path>]          write header and visible rows
  help                   show this text
  quit                   leave the shell";

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search(String),
    Filter(String),
    ClearFilter,
    /// Inclusive row ranges, checked against the grid only when executed.
    DeleteRows(Vec<RangeInclusive<usize>>),
    DeleteColumn(usize),
    Cell { row: usize, col: usize },
    Column(usize),
    Show(Option<usize>),
    Rows,
    Open(PathBuf),
    Save(Option<PathBuf>),
    Help,
    Quit,
}

/// A line that could not be turned into an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not a valid index")]
    InvalidIndex(String),

    #[error("'{0}' is not a valid range")]
    InvalidRange(String),

    #[error("'{command}' takes no argument, got '{argument}'")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },
}

/// Parses one input line.
///
/// Returns `Ok(None)` for blank lines and `#` comments. Text arguments of
/// `search` and `filter` are taken verbatim after the first space.
pub fn parse_action(line: &str) -> Result<Option<Action>, ActionError> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

    let action = match command {
        "search" | "find" => Action::Search(rest.to_string()),
        "filter" => Action::Filter(rest.to_string()),
        "clear" => no_argument("clear", rest, Action::ClearFilter)?,
        "delete-rows" | "dr" => Action::DeleteRows(parse_row_list(required(
            "delete-rows",
            "a row list",
            rest,
        )?)?),
        "delete-column" | "dc" => {
            Action::DeleteColumn(parse_index(required("delete-column", "a column", rest)?)?)
        }
        "cell" => {
            let mut parts = rest.split_whitespace();
            let (Some(row), Some(col)) = (parts.next(), parts.next()) else {
                return Err(ActionError::MissingArgument {
                    command: "cell",
                    argument: "a row and a column",
                });
            };
            Action::Cell {
                row: parse_index(row)?,
                col: parse_index(col)?,
            }
        }
        "column" => Action::Column(parse_index(required("column", "a column", rest)?)?),
        "show" => match rest.trim() {
            "" => Action::Show(None),
            limit => Action::Show(Some(parse_index(limit)?)),
        },
        "rows" => no_argument("rows", rest, Action::Rows)?,
        "open" => Action::Open(PathBuf::from(required("open", "a path", rest)?)),
        "save" => match rest.trim() {
            "" => Action::Save(None),
            path => Action::Save(Some(PathBuf::from(path))),
        },
        "help" | "?" => Action::Help,
        "quit" | "exit" | "q" => Action::Quit,
        other => return Err(ActionError::UnknownCommand(other.to_string())),
    };
    Ok(Some(action))
}

fn required<'a>(
    command: &'static str,
    argument: &'static str,
    rest: &'a str,
) -> Result<&'a str, ActionError> {
    let rest = rest.trim();
    if rest.is_empty() {
        Err(ActionError::MissingArgument { command, argument })
    } else {
        Ok(rest)
    }
}

fn no_argument(command: &'static str, rest: &str, action: Action) -> Result<Action, ActionError> {
    let rest = rest.trim();
    if rest.is_empty() {
        Ok(action)
    } else {
        Err(ActionError::UnexpectedArgument {
            command,
            argument: rest.to_string(),
        })
    }
}

fn parse_index(value: &str) -> Result<usize, ActionError> {
    value
        .trim()
        .parse()
        .map_err(|_| ActionError::InvalidIndex(value.trim().to_string()))
}

/// Parses `0,2,5-7` into `[0..=0, 2..=2, 5..=7]`.
pub fn parse_row_list(list: &str) -> Result<Vec<RangeInclusive<usize>>, ActionError> {
    let mut ranges = Vec::new();
    for part in list.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start = parse_index(start)?;
                let end = parse_index(end)?;
                if start > end {
                    return Err(ActionError::InvalidRange(part.to_string()));
                }
                ranges.push(start..=end);
            }
            None => {
                let index = parse_index(part)?;
                ranges.push(index..=index);
            }
        }
    }
    Ok(ranges)
}

/// Expands row ranges into indexes, once every range fits in `len` rows.
///
/// The check comes first so a typo like `0-99999999999` costs nothing.
pub fn expand_row_ranges(
    ranges: &[RangeInclusive<usize>],
    len: usize,
) -> Result<Vec<usize>, IndexError> {
    if let Some(range) = ranges.iter().find(|range| *range.end() >= len) {
        return Err(IndexError::Row {
            index: (*range.start()).max(len),
            len,
        });
    }
    Ok(ranges.iter().cloned().flatten().collect())
}

/// Whether the shell should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session bound to an optional file on disk.
pub struct Shell {
    session: Session,
    path: Option<PathBuf>,
    settings: Settings,
}

impl Shell {
    pub fn new(session: Session, path: Option<PathBuf>, settings: Settings) -> Self {
        Self {
            session,
            path,
            settings,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Reads actions from `input` until it ends or a `quit` action.
    ///
    /// Bad lines and failed actions are reported on `out`; only write
    /// failures on `out` and read failures on `input` end the loop early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, prompt: bool) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            let action = match parse_action(&line) {
                Ok(Some(action)) => action,
                Ok(None) => continue,
                Err(err) => {
                    writeln!(out, "error: {err}")?;
                    continue;
                }
            };
            match self.execute(action, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => writeln!(out, "error: {err:#}")?,
            }
        }
        Ok(())
    }

    /// Applies one action to the session and reports the result on `out`.
    pub fn execute<W: Write>(&mut self, action: Action, out: &mut W) -> Result<Flow> {
        debug!(?action, "executing action");
        match action {
            Action::Search(text) => {
                trace!(text = redact_value(&text), "search");
                match self.session.search(&text) {
                    Some(position) => {
                        let name = self.session.grid().column_name(position.col)?;
                        let value = self.session.cell_at(position.row, position.col)?;
                        writeln!(
                            out,
                            "match at row {}, column {} ({name}): {value}",
                            position.row, position.col
                        )?;
                    }
                    None => writeln!(out, "no further matches for \"{text}\"")?,
                }
            }
            Action::Filter(text) => {
                let outcome = self.session.apply_filter(&text);
                self.report_filter(outcome, out)?;
            }
            Action::ClearFilter => {
                let outcome = self.session.clear_filter();
                self.report_filter(outcome, out)?;
            }
            Action::DeleteRows(ranges) => {
                let label = self.session.row_action_label();
                let indexes = expand_row_ranges(&ranges, self.session.row_count())?;
                let removed = self.session.delete_rows(&indexes)?;
                writeln!(out, "{label}: {removed}")?;
                writeln!(out, "{}", row_label(self.session.row_count()))?;
            }
            Action::DeleteColumn(col) => {
                let name = self.session.delete_column(col)?;
                writeln!(out, "deleted column {col} ({name})")?;
            }
            Action::Cell { row, col } => {
                let value = self.session.cell_at(row, col)?;
                trace!(row, col, value = redact_value(value), "cell readout");
                writeln!(out, "{value}")?;
            }
            Action::Column(col) => {
                let name = self.session.grid().column_name(col)?;
                writeln!(out, "{name}")?;
                for value in self.session.column_cells(col)? {
                    writeln!(out, "{value}")?;
                }
            }
            Action::Show(limit) => {
                let options = RenderOptions {
                    max_rows: limit.unwrap_or(self.settings.display.max_rows),
                    max_cell_width: self.settings.display.max_cell_width,
                };
                writeln!(out, "{}", grid_table(self.session.grid(), options))?;
                writeln!(out, "{}", row_label(self.session.row_count()))?;
            }
            Action::Rows => writeln!(out, "{}", row_label(self.session.row_count()))?,
            Action::Open(path) => {
                reopen_session(&mut self.session, &path)?;
                writeln!(out, "opened {}", path.display())?;
                writeln!(out, "{}", row_label(self.session.row_count()))?;
                self.path = Some(path);
            }
            Action::Save(target) => {
                let target = target
                    .or_else(|| self.path.clone())
                    .ok_or_else(|| anyhow!("no file name; use 'save <path>'"))?;
                let target = if self.settings.save.append_csv_extension {
                    with_csv_extension(&target)
                } else {
                    target
                };
                save_session(&self.session, &target)?;
                writeln!(out, "saved {}", target.display())?;
            }
            Action::Help => writeln!(out, "{HELP}")?,
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn report_filter<W: Write>(&self, outcome: FilterOutcome, out: &mut W) -> Result<()> {
        match outcome {
            FilterOutcome::Unchanged => writeln!(out, "no filter active")?,
            FilterOutcome::Cleared => writeln!(out, "filter cleared")?,
            FilterOutcome::Entered | FilterOutcome::Refiltered => {
                let text = self.session.filter_text().unwrap_or_default();
                writeln!(out, "filter \"{text}\" applied")?;
            }
        }
        writeln!(out, "{}", row_label(self.session.row_count()))?;
        Ok(())
    }
}
