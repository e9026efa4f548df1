//! Loading and saving the tournament book on disk.

use anyhow::{Context, Result};
use bracket_master::TournamentBook;
use log::{debug, info};
use std::{fs, io::ErrorKind, path::Path};

/// Load the book at `path`. A missing file is an empty book.
pub fn load(path: &Path) -> Result<TournamentBook> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No book at {}, starting empty", path.display());
            return Ok(TournamentBook::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let book = TournamentBook::from_json(&json)
        .with_context(|| format!("Failed to load tournaments from {}", path.display()))?;
    debug!("Loaded {} tournament(s) from {}", book.len(), path.display());
    Ok(book)
}

/// Write the book to `path`, replacing the previous file in one rename.
pub fn save(book: &TournamentBook, path: &Path) -> Result<()> {
    let json = book.to_json().context("Failed to encode tournaments")?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, json).with_context(|| format!("Failed to write {}", path.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;

    info!("Saved {} tournament(s) to {}", book.len(), path.display());
    Ok(())
}
