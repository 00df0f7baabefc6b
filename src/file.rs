// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::csv::write_row;
use crate::error::{CrawlError, Result};

/// Create a summary table, or keep it as-is in append mode.
/// The header is written only when the file is (re)created.
/// Returns true if the file was created.
pub fn open_table(path: &Path, headers: &[String], sep: char, append: bool) -> Result<bool> {
    if append && path.is_file() {
        return Ok(false);
    }
    write_rows_start(path, Some(headers), sep)?;
    Ok(true)
}

/// Ensure parent dir exists; create/truncate file; optionally write header.
pub fn write_rows_start(path: &Path, headers: Option<&[String]>, sep: char) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let out_err = |e| CrawlError::output(path, e);
    let file = File::create(path).map_err(out_err)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    if let Some(h) = headers {
        write_row(&mut out, h, sep).map_err(out_err)?;
    }
    out.flush().map_err(out_err)?;
    Ok(())
}

/// Append multiple rows to an existing CSV/TSV file (must be created already).
pub fn append_rows(path: &Path, rows: &[Vec<String>], sep: char) -> Result<()> {
    let out_err = |e| CrawlError::output(path, e);
    let file = OpenOptions::new().append(true).open(path).map_err(out_err)?;
    let mut out = BufWriter::new(file);
    for row in rows {
        write_row(&mut out, row, sep).map_err(out_err)?;
    }
    out.flush().map_err(out_err)?;
    Ok(())
}

/// One intervention text file. Overwrites; the name is deterministic.
pub fn write_intervention(dir: &Path, file_name: &str, text: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, text).map_err(|e| CrawlError::output(&path, e))?;
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        let e = std::io::Error::other(format!("path exists but is not a directory: {}", dir.display()));
        return Err(CrawlError::output(dir, e));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| CrawlError::output(dir, e))?;
    }
    Ok(())
}
