//! CLI argument definitions for the GigaCsv viewer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "gigacsv",
    version,
    about = "GigaCsv - view, search, filter and trim CSV files",
    long_about = "View, search, filter and trim CSV files.\n\n\
                  Use `shell` to open a file and apply actions one line at a time,\n\
                  either interactively or from a piped script."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell contents and search text in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file to use instead of the per-user default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a CSV file as a table.
    Show(ShowArgs),

    /// Find cells containing a piece of text.
    Search(SearchArgs),

    /// Open a CSV file and apply actions read from stdin.
    Shell(ShellArgs),

    /// Print the effective settings.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct ShowArgs {
    /// CSV file to display.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only show rows with a cell containing this text.
    #[arg(long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Maximum number of rows to print (default from settings).
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// CSV file to search.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Text to look for (case-sensitive substring).
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Report every match instead of only the first.
    #[arg(long = "all")]
    pub all: bool,
}

#[derive(Parser)]
pub struct ShellArgs {
    /// CSV file to open.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Write the default settings file if none exists.
    #[arg(long = "init")]
    pub init: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
