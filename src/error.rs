// src/error.rs
//! Error taxonomy for the crawl.
//!
//! Only local disk failures ([`CrawlError::CacheIo`], [`CrawlError::Output`])
//! are fatal. Everything else is a hole in the hierarchy: the owning node
//! (page, link, speaker, row) is skipped and logged.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// GET could not be performed at all (DNS, connect, body read)
    #[error("network error for {url}: {reason}")]
    Network { url: String, reason: String },

    /// GET returned a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Expected anchor/pattern missing
    #[error("cannot parse {what}: {context}")]
    Parse { what: &'static str, context: String },

    /// Local cache could not be read or written
    #[error("cache I/O error at {}: {source}", path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file or summary table could not be written
    #[error("output error at {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A referenced tag or key has no resolved data at assembly time
    #[error("missing {what}: {context}")]
    DataConsistency { what: &'static str, context: String },
}

impl CrawlError {
    pub fn parse(what: &'static str, context: impl Into<String>) -> Self {
        CrawlError::Parse { what, context: context.into() }
    }

    pub fn missing(what: &'static str, context: impl Into<String>) -> Self {
        CrawlError::DataConsistency { what, context: context.into() }
    }

    pub fn cache_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CrawlError::CacheIo { path: path.into(), source }
    }

    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CrawlError::Output { path: path.into(), source }
    }

    /// Local disk failed; stop the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CrawlError::CacheIo { .. } | CrawlError::Output { .. })
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_disk_errors_are_fatal() {
        let io = CrawlError::cache_io("x", std::io::Error::other("disk full"));
        assert!(io.is_fatal());
        assert!(CrawlError::output("y", std::io::Error::other("denied")).is_fatal());
        assert!(!CrawlError::parse("date", "no title").is_fatal());
        assert!(!CrawlError::Status { url: "u".into(), status: 404 }.is_fatal());
        assert!(!CrawlError::missing("refTag", "r1").is_fatal());
    }

    #[test]
    fn messages_carry_context() {
        let e = CrawlError::Status { url: "http://x/y".into(), status: 503 };
        assert_eq!(e.to_string(), "HTTP 503 for http://x/y");
        let e = CrawlError::parse("query-topic id", "s001.html");
        assert_eq!(e.to_string(), "cannot parse query-topic id: s001.html");
    }
}
