// src/config/consts.rs

// Net config
pub const HOST: &str = "www.psp.cz";
pub const ARCHIVE_ROOT: &str = "http://www.psp.cz/eknih/";
pub const USER_AGENT: &str = "steno_scrape/0.4";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Biography pages of the central government office
pub const GOV_HOSTS: &[&str] = &["www.vlada.cz", "vlada.cz"];

// Local cache
pub const STORE_DIR: &str = ".store";
pub const CACHE_SUBDIR: &str = "cache";
pub const LOG_FILE: &str = "debug.log";
/// Stripped from URLs before they become cache paths
pub const CACHE_STRIP_PREFIX: &str = "http://www.psp.cz/";
/// Appended to every cached file name. Fragments are dropped before mapping,
/// so no directory segment carries it and a page never collides with a directory.
pub const CACHE_LEAF_MARK: char = '#';

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const FILE_SUMMARY: &str = "file_summary.tsv";
pub const SPEAKERS_SUMMARY: &str = "speakers_summary.tsv";
pub const TSV_SEP: char = '\t';

pub const DEFAULT_TERM: u16 = 2017;
