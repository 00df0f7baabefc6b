// src/log.rs
//! File logging. Everything goes through `tracing`; this only installs the
//! subscriber that writes `[hh:mm:ss.mmm] LEVEL target: message` lines.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

use crate::config::consts::{LOG_FILE, STORE_DIR};

static INSTALLED: OnceLock<PathBuf> = OnceLock::new();

pub fn default_log_path() -> PathBuf {
    Path::new(STORE_DIR).join(LOG_FILE)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Time since the logger was installed.
struct Elapsed(Instant);

impl FormatTime for Elapsed {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "[{}]", fmt_elapsed(self.0.elapsed().as_millis()))
    }
}

/// Install the file logger. Level comes from `RUST_LOG`, default `info`.
/// A second call is a no-op and returns the first path.
pub fn init(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(p) = INSTALLED.get() {
        return Ok(p.clone());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Fails only if some other subscriber is already global; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(Elapsed(Instant::now()))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(INSTALLED.get_or_init(|| path.to_path_buf()).clone())
}
