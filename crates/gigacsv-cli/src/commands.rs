use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use comfy_table::{Cell, Table};
use tracing::{info, info_span};

use gigacsv_cli::files::open_session;
use gigacsv_cli::logging::redact_value;
use gigacsv_cli::render::{RenderOptions, apply_table_style, grid_table, row_label};
use gigacsv_cli::settings::{Settings, settings_path};
use gigacsv_cli::shell::Shell;

use crate::cli::{ConfigArgs, SearchArgs, ShellArgs, ShowArgs};

pub fn run_show(args: &ShowArgs, settings: &Settings) -> Result<()> {
    let span = info_span!("show", file = %args.file.display());
    let _guard = span.enter();
    let mut session = open_session(&args.file)?;
    if let Some(filter) = &args.filter {
        session.apply_filter(filter);
    }
    let options = RenderOptions {
        max_rows: args.limit.unwrap_or(settings.display.max_rows),
        max_cell_width: settings.display.max_cell_width,
    };
    println!("{}", grid_table(session.grid(), options));
    println!("{}", row_label(session.row_count()));
    Ok(())
}

/// Prints the first match, or every match with `--all`.
///
/// Returns whether anything matched.
pub fn run_search(args: &SearchArgs) -> Result<bool> {
    let span = info_span!("search", file = %args.file.display());
    let _guard = span.enter();
    let mut session = open_session(&args.file)?;
    tracing::trace!(text = redact_value(&args.text), "searching");

    let mut table = Table::new();
    table.set_header(vec!["Row", "Column", "Value"]);
    apply_table_style(&mut table);
    let mut matches = 0usize;
    while let Some(position) = session.search(&args.text) {
        let name = session.grid().column_name(position.col)?;
        let value = session.cell_at(position.row, position.col)?;
        table.add_row(vec![
            Cell::new(position.row),
            Cell::new(format!("{} ({name})", position.col)),
            Cell::new(value),
        ]);
        matches += 1;
        if !args.all {
            break;
        }
    }
    info!(matches, "search finished");

    if matches == 0 {
        println!("no matches for \"{}\"", args.text);
        return Ok(false);
    }
    println!("{table}");
    Ok(true)
}

pub fn run_shell(args: &ShellArgs, settings: Settings) -> Result<()> {
    let session = open_session(&args.file)?;
    let mut shell = Shell::new(session, Some(args.file.clone()), settings);
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut stdout = io::stdout().lock();
    shell.run(stdin.lock(), &mut stdout, prompt)
}

pub fn run_config(args: &ConfigArgs, explicit: Option<&Path>, settings: &Settings) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => settings_path().ok_or_else(|| anyhow!("could not determine settings path"))?,
    };
    if args.init {
        if path.exists() {
            println!("settings file already exists: {}", path.display());
        } else {
            Settings::default()
                .save_to(&path)
                .context("write default settings")?;
            println!("wrote default settings to {}", path.display());
        }
    }
    println!("# {}", path.display());
    print!("{}", settings.to_toml()?);
    Ok(())
}
