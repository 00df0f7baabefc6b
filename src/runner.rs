// src/runner.rs
//! Drives a crawl over the selected sessions of one term.
//!
//! Per session: resolve the topic skeleton, extract every steno page once,
//! resolve speakers not seen before, join, then write text files and append
//! to the two summary tables. The session works on its own speaker registry
//! that is folded into the caller's when the session is done.

use std::collections::{HashMap, HashSet};

use tracing::{error, info};

use crate::{
    config::consts::TSV_SEP,
    config::options::{CrawlOptions, SessionSelector},
    core::net::Transport,
    error::Result,
    file::{append_rows, ensure_directory, open_table, write_intervention},
    model::{SpeakerRegistry, StenoPage},
    progress::Progress,
    report::{self, ReportRow, INDEX_HEADERS, ROSTER_HEADERS},
    specs::{archive, session, speaker, steno},
    store::PageCache,
};

/// Summary of what was produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sessions_done: usize,
    pub sessions_failed: usize,
    pub rows_written: usize,
    pub files_written: usize,
    pub speakers_resolved: usize,
    pub cache_misses: usize,
}

#[derive(Default)]
struct SessionStats {
    rows: usize,
    files: usize,
    speakers_resolved: usize,
}

/// Top-level runner.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run<T: Transport>(
    opts: &CrawlOptions,
    cache: &mut PageCache<T>,
    registry: &mut SpeakerRegistry,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let misses_before = cache.misses();
    let targets = select_sessions(opts, cache)?;

    let mut summary = RunSummary::default();
    if targets.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.log("No sessions to process (after filtering).");
            p.finish();
        }
        return Ok(summary);
    }

    ensure_directory(&opts.out_dir)?;
    let index_path = opts.file_summary_path();
    let roster_path = opts.speakers_summary_path();
    open_table(&index_path, &report::headers(&INDEX_HEADERS), TSV_SEP, opts.append)?;
    open_table(&roster_path, &report::headers(&ROSTER_HEADERS), TSV_SEP, opts.append)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(targets.len());
    }
    info!(term = opts.term, sessions = targets.len(), "crawl started");

    let mut rostered: HashSet<String> = HashSet::new();
    for (number, index_url) in targets {
        let outcome = crawl_session(opts, cache, registry, number, &index_url, &mut rostered);
        match outcome {
            Ok(stats) => {
                summary.sessions_done += 1;
                summary.rows_written += stats.rows;
                summary.files_written += stats.files;
                summary.speakers_resolved += stats.speakers_resolved;
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(number, stats.rows);
                }
            }
            Err(e) if e.is_fatal() => {
                if let Some(p) = progress.as_deref_mut() {
                    p.finish();
                }
                return Err(e);
            }
            Err(e) => {
                error!(session = number, url = %index_url, error = %e, "session abandoned");
                summary.sessions_failed += 1;
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(number, &e.to_string());
                }
            }
        }
    }

    summary.cache_misses = cache.misses() - misses_before;
    info!(?summary, "crawl finished");
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(summary)
}

/// `(session number, index url)` to crawl, in archive order.
fn select_sessions<T: Transport>(opts: &CrawlOptions, cache: &mut PageCache<T>) -> Result<Vec<(u32, String)>> {
    let mut targets = match &opts.sessions {
        SessionSelector::One(n) => vec![(*n, opts.session_index(*n))],
        SessionSelector::Ids(ids) => ids.iter().map(|n| (*n, opts.session_index(*n))).collect(),
        SessionSelector::All => archive::list_sessions(cache, &opts.archive_index())?,
    };
    if let Some(limit) = opts.limit {
        targets.truncate(limit);
    }
    Ok(targets)
}

fn crawl_session<T: Transport>(
    opts: &CrawlOptions,
    cache: &mut PageCache<T>,
    registry: &mut SpeakerRegistry,
    number: u32,
    index_url: &str,
    rostered: &mut HashSet<String>,
) -> Result<SessionStats> {
    let sess = session::resolve_session(cache, number, index_url)?;

    let mut pages: HashMap<String, StenoPage> = HashMap::new();
    let mut local = SpeakerRegistry::new();
    for name in sess.steno_pages() {
        let page = match steno::fetch_page(cache, index_url, name) {
            Ok(p) => p,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                error!(session = number, page = name, error = %e, "steno page skipped");
                continue;
            }
        };
        for iv in page.values().filter(|iv| !iv.speaker_key.is_empty()) {
            match registry.get(&iv.speaker_key) {
                Some(sp) if sp.resolved => {
                    local.adopt(sp.clone());
                }
                _ => {
                    local.ensure_stub(&iv.speaker_key, &iv.steno_name);
                }
            }
        }
        pages.insert(s!(name), page);
    }

    let resolved = speaker::resolve_pending(cache, &mut local)?;
    let rows = report::assemble(&sess, &pages, &local);

    let mut stats = SessionStats { rows: rows.len(), files: 0, speakers_resolved: resolved.resolved };
    if opts.write_texts {
        for row in &rows {
            write_intervention(&opts.out_dir, &row.file_name, &row.text)?;
            stats.files += 1;
        }
    }
    append_rows(&opts.file_summary_path(), &rows.iter().map(ReportRow::cells).collect::<Vec<_>>(), TSV_SEP)?;

    let roster: Vec<Vec<String>> = report::roster(&rows, &local)
        .into_iter()
        .filter(|sp| sp.resolved && rostered.insert(sp.key.clone()))
        .map(report::roster_cells)
        .collect();
    append_rows(&opts.speakers_summary_path(), &roster, TSV_SEP)?;

    info!(session = number, rows = stats.rows, speakers = roster.len(), "session written");
    registry.merge(local);
    Ok(stats)
}
