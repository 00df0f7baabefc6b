// src/specs/archive.rs
//! Scraping *spec* for a term's stenoprotocol index.
//!
//! `http://www.psp.cz/eknih/2017ps/stenprot/index.htm` lists one link per
//! session, `005schuz/index.htm`. We return `(session number, absolute index
//! url)` in page order, deduplicated.

use tracing::{debug, info};

use crate::config::dialect::SESSION_LINK;
use crate::core::html::{selector, Document};
use crate::core::net::{join_url, Transport};
use crate::error::Result;
use crate::store::PageCache;

pub fn list_sessions<T: Transport>(cache: &mut PageCache<T>, index_url: &str) -> Result<Vec<(u32, String)>> {
    let html = cache.fetch(index_url)?;
    let sessions = parse_session_links(&html, index_url)?;
    info!(index_url, count = sessions.len(), "sessions listed");
    Ok(sessions)
}

pub fn parse_session_links(html: &str, index_url: &str) -> Result<Vec<(u32, String)>> {
    let doc = Document::parse(html);
    let a_sel = selector("a[href]");

    let mut out: Vec<(u32, String)> = Vec::new();
    for a in doc.select(&a_sel) {
        let href = a.attribute("href").unwrap_or_default().trim();
        let Some(c) = SESSION_LINK.captures(href) else {
            if href.contains("schuz") {
                debug!(href, "not a session index link");
            }
            continue;
        };
        let Ok(number) = c["session"].parse::<u32>() else { continue };
        if out.iter().any(|(n, _)| *n == number) {
            continue;
        }
        out.push((number, join_url(index_url, href)?));
    }
    Ok(out)
}
