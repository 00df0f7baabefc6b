// src/cli.rs
use std::{env, path::PathBuf};

use color_eyre::eyre::{bail, eyre, Result, WrapErr};

use crate::config::options::{CrawlOptions, SessionSelector};
use crate::core::net::HttpTransport;
use crate::model::SpeakerRegistry;
use crate::progress::Progress;
use crate::specs::archive;
use crate::store::PageCache;

pub struct Params {
    pub opts: CrawlOptions,
    /// Print the term's sessions and exit
    pub list_sessions: bool,
}

pub fn run() -> Result<()> {
    let params = parse_cli(env::args().skip(1))?;
    let log_path = crate::log::init(&crate::log::default_log_path()).wrap_err("cannot open log file")?;

    let transport = HttpTransport::new()?;
    let mut cache = PageCache::new(&params.opts.cache_dir, transport);

    if params.list_sessions {
        for (n, url) in archive::list_sessions(&mut cache, &params.opts.archive_index())? {
            println!("{n}\t{url}");
        }
        return Ok(());
    }

    let mut registry = SpeakerRegistry::new();
    let mut progress = CliProgress::default();
    let summary = crate::runner::run(&params.opts, &mut cache, &mut registry, Some(&mut progress))
        .wrap_err_with(|| format!("crawl stopped, see {}", log_path.display()))?;

    eprintln!(
        "Done: {} sessions ({} failed), {} rows, {} files, {} speakers, {} downloads",
        summary.sessions_done,
        summary.sessions_failed,
        summary.rows_written,
        summary.files_written,
        summary.speakers_resolved,
        summary.cache_misses,
    );
    Ok(())
}

pub fn parse_cli<I: Iterator<Item = String>>(mut args: I) -> Result<Params> {
    let mut params = Params { opts: CrawlOptions::default(), list_sessions: false };
    let opts = &mut params.opts;

    while let Some(a) = args.next() {
        let mut value = |what: &str| args.next().ok_or_else(|| eyre!("Missing value for {what}"));
        match a.as_str() {
            "-y" | "--term" => opts.term = value("--term")?.parse().wrap_err("bad term year")?,
            "-s" | "--session" => opts.sessions = SessionSelector::One(value("--session")?.parse()?),
            "--ids" => opts.sessions = SessionSelector::Ids(parse_ids_list(&value("--ids")?)?),
            "--all" | "-a" => opts.sessions = SessionSelector::All,
            "-o" | "--out" => opts.out_dir = PathBuf::from(value("--out")?),
            "--cache" => opts.cache_dir = PathBuf::from(value("--cache")?),
            "--limit" => opts.limit = Some(value("--limit")?.parse()?),
            "--append" => opts.append = true,
            "--no-texts" => opts.write_texts = false,
            "--list-sessions" => params.list_sessions = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => bail!("Unknown arg: {a}"),
        }
    }

    Ok(params)
}

/// `1,3,5-8` → sorted, deduplicated session numbers.
pub fn parse_ids_list(s: &str) -> Result<Vec<u32>> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some(dash) = part.find('-') {
            let a: u32 = part[..dash].trim().parse()?;
            let b: u32 = part[dash + 1..].trim().parse()?;
            if a > b { bail!("Invalid range: {part}"); }
            out.extend(a..=b);
        } else {
            out.push(part.parse()?);
        }
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

#[derive(Default)]
struct CliProgress {
    total: usize,
    seen: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Crawling {total} session(s)...");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, session: u32, rows: usize) {
        self.seen += 1;
        eprintln!("[{}/{}] session {session}: {rows} interventions", self.seen, self.total);
    }

    fn item_failed(&mut self, session: u32, reason: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] session {session} skipped: {reason}", self.seen, self.total);
    }
}
