// src/config/options.rs
use std::path::PathBuf;
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionSelector {
    All,
    One(u32),
    Ids(Vec<u32>),
}

impl SessionSelector {
    pub fn accepts(&self, session: u32) -> bool {
        match self {
            SessionSelector::All => true,
            SessionSelector::One(n) => *n == session,
            SessionSelector::Ids(v) => v.contains(&session),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Legislative term, by the year it started (1993, ..., 2013, 2017)
    pub term: u16,
    pub sessions: SessionSelector,
    pub out_dir: PathBuf,
    pub cache_dir: PathBuf,
    /// Append to existing summaries instead of creating them fresh
    pub append: bool,
    /// Write one text file per intervention
    pub write_texts: bool,
    /// Stop after this many sessions
    pub limit: Option<usize>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            term: DEFAULT_TERM,
            sessions: SessionSelector::All,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            cache_dir: PathBuf::from(STORE_DIR).join(CACHE_SUBDIR),
            append: false,
            write_texts: true,
            limit: None,
        }
    }
}

impl CrawlOptions {
    /// `http://www.psp.cz/eknih/2017ps/stenprot/`
    pub fn term_root(&self) -> String {
        join!(ARCHIVE_ROOT, &self.term.to_string(), "ps/stenprot/")
    }

    pub fn archive_index(&self) -> String {
        join!(&self.term_root(), "index.htm")
    }

    /// `http://www.psp.cz/eknih/2017ps/stenprot/005schuz/index.htm`
    pub fn session_index(&self, session: u32) -> String {
        format!("{}{session:03}schuz/index.htm", self.term_root())
    }

    pub fn file_summary_path(&self) -> PathBuf {
        self.out_dir.join(FILE_SUMMARY)
    }

    pub fn speakers_summary_path(&self) -> PathBuf {
        self.out_dir.join(SPEAKERS_SUMMARY)
    }
}
