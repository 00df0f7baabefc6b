// src/store.rs
//! Persistent page cache.
//!
//! Every fetch goes through [`PageCache::fetch`]. A page is stored under the
//! cache root at a path mirroring its remote path, and is never refetched.
//! File names carry a trailing `#` so that a page and a directory of the same
//! name can coexist (`/babis` next to `/babis/zivotopis/`).
//! The archive does not change once published, so entries never expire.

use std::{fs, path::{Path, PathBuf}};

use tracing::{debug, trace};
use url::Url;

use crate::config::consts::{CACHE_LEAF_MARK, CACHE_STRIP_PREFIX};
use crate::core::net::Transport;
use crate::error::{CrawlError, Result};

pub struct PageCache<T: Transport> {
    root: PathBuf,
    transport: T,
    strip_prefix: String,
    misses: usize,
}

impl<T: Transport> PageCache<T> {
    pub fn new(root: impl Into<PathBuf>, transport: T) -> Self {
        Self {
            root: root.into(),
            transport,
            strip_prefix: s!(CACHE_STRIP_PREFIX),
            misses: 0,
        }
    }

    /// URLs starting with `prefix` are stored without it; all others under `<host>/<path>`.
    pub fn with_strip_prefix(mut self, prefix: &str) -> Self {
        self.strip_prefix = s!(prefix);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of network calls made so far. Informational only.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Cache path of `url`, relative to the root.
    pub fn relative_path(&self, url: &str) -> Result<PathBuf> {
        let url = url.split('#').next().unwrap_or(url);

        let rest = match url.strip_prefix(self.strip_prefix.as_str()) {
            Some(r) if !self.strip_prefix.is_empty() => s!(r),
            _ => {
                let parsed = Url::parse(url)
                    .map_err(|e| CrawlError::parse("url", format!("{url}: {e}")))?;
                let host = parsed
                    .host_str()
                    .ok_or_else(|| CrawlError::parse("url host", url))?;
                let mut r = join!(host, parsed.path());
                if let Some(q) = parsed.query() {
                    r.push('?');
                    r.push_str(q);
                }
                r
            }
        };

        let (dirs, leaf) = rest.rsplit_once('/').unwrap_or(("", rest.as_str()));
        let parent = || CrawlError::parse("cache path", format!("parent segment in {url}"));
        let mut out = PathBuf::new();
        for seg in dirs.split('/') {
            match seg {
                "" | "." => continue,
                ".." => return Err(parent()),
                s => out.push(sanitize_segment(s)),
            }
        }
        // `a` and `a/b` can both be pages
        let mut leaf = match leaf {
            "" | "." => s!("index.html"),
            ".." => return Err(parent()),
            s => sanitize_segment(s),
        };
        leaf.push(CACHE_LEAF_MARK);
        out.push(leaf);
        Ok(out)
    }

    pub fn path_for(&self, url: &str) -> Result<PathBuf> {
        Ok(self.root.join(self.relative_path(url)?))
    }

    pub fn contains(&self, url: &str) -> bool {
        self.path_for(url).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Cached body of `url`, fetching and persisting it on a miss.
    pub fn fetch(&mut self, url: &str) -> Result<String> {
        let path = self.path_for(url)?;
        if path.is_file() {
            trace!(url, "cache hit");
            return fs::read_to_string(&path).map_err(|e| CrawlError::cache_io(&path, e));
        }

        self.misses += 1;
        debug!(url, misses = self.misses, "cache miss");
        let body = self.transport.get(url)?;
        persist(&path, &body)?;
        Ok(body)
    }
}

/// Write to a sibling temp file, then rename; the cache only ever holds full bodies.
fn persist(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| CrawlError::cache_io(parent, e))?;
        }
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".part");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, body).map_err(|e| CrawlError::cache_io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| CrawlError::cache_io(path, e))?;
    Ok(())
}

fn sanitize_segment(seg: &str) -> String {
    seg.chars()
        .map(|c| match c {
            '?' | '=' | '&' | ':' | '*' | '"' | '<' | '>' | '|' | '\\' => '_',
            c => c,
        })
        .collect()
}
