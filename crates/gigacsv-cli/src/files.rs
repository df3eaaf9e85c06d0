//! Reading and writing CSV files on disk.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gigacsv_core::Session;
use tracing::info;

/// Opens a CSV file into a new session.
pub fn open_session(path: &Path) -> Result<Session> {
    let text = read_csv_text(path)?;
    let session =
        Session::from_csv(&text).with_context(|| format!("parse CSV {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = session.row_count(),
        columns = session.column_count(),
        "opened CSV file"
    );
    Ok(session)
}

/// Reloads `session` from a file, leaving it untouched on any failure.
pub fn reopen_session(session: &mut Session, path: &Path) -> Result<()> {
    let text = read_csv_text(path)?;
    session
        .open(&text)
        .with_context(|| format!("parse CSV {}", path.display()))?;
    info!(path = %path.display(), rows = session.row_count(), "reopened CSV file");
    Ok(())
}

/// Reads a whole file as UTF-8 text.
pub fn read_csv_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| {
        format!(
            "could not open {} (check that it exists and is UTF-8 encoded)",
            path.display()
        )
    })
}

/// Writes the header and visible rows of `session` to `path`.
pub fn save_session(session: &Session, path: &Path) -> Result<()> {
    let text = session.to_csv()?;
    fs::write(path, text).with_context(|| format!("could not write {}", path.display()))?;
    info!(path = %path.display(), rows = session.row_count(), "saved CSV file");
    Ok(())
}

/// Appends `.csv` to paths that don't already end in it.
///
/// An existing different extension is kept: `data.txt` becomes `data.txt.csv`.
pub fn with_csv_extension(path: &Path) -> PathBuf {
    if path.as_os_str().to_string_lossy().ends_with(".csv") {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".csv");
    PathBuf::from(name)
}
