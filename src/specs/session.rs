// src/specs/session.rs
//! Scraping *spec* for a session index and its day pages.
//!
//! The session index (`005schuz/index.htm`) is a list of `<p>` blocks. A block
//! whose first anchor carries an `id` opens a topic; the text right after that
//! anchor is the topic title. The remaining anchors in the block point into day
//! pages (`2017/05-1.html#q3`).
//!
//! A day page is a flat run of anchors. An anchor with an `id` (`q3`) opens a
//! reference group; following `s005001.htm#r2` links belong to the open group.
//! The page title carries the session day.
//!
//! Several topics can point into the same day page, so each page is fetched
//! and scanned once per session. Any one link or page failing only leaves a hole.

use std::collections::HashMap;

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::{debug, error, info, warn};

use crate::config::dialect::{date_from, is_vote_link, INTERVENTION_LINK, PAGE_PATH, QUERY_TOPIC, TITLE_DATE};
use crate::core::html::{selector, Document};
use crate::core::net::{join_url, Transport};
use crate::core::sanitize::NBSP;
use crate::error::{CrawlError, Result};
use crate::model::{InterventionRef, Session, Topic};
use crate::store::PageCache;

/// Reference groups of one day page, keyed by query-topic id.
pub type PageGroups = IndexMap<String, Vec<InterventionRef>>;

pub fn resolve_session<T: Transport>(
    cache: &mut PageCache<T>,
    number: u32,
    index_url: &str,
) -> Result<Session> {
    let html = cache.fetch(index_url)?;
    let mut resolver = SessionResolver { cache, index_url, pages: HashMap::new() };
    let session = resolver.parse_index(number, &html)?;
    info!(
        session = number,
        topics = session.topics.len(),
        refs = session.ref_count(),
        pages = resolver.pages.len(),
        "session resolved"
    );
    Ok(session)
}

struct SessionResolver<'c, T: Transport> {
    cache: &'c mut PageCache<T>,
    index_url: &'c str,
    /// Day page URL → its groups; `None` once a page has failed
    pages: HashMap<String, Option<PageGroups>>,
}

impl<T: Transport> SessionResolver<'_, T> {
    fn parse_index(&mut self, number: u32, html: &str) -> Result<Session> {
        let doc = Document::parse(html);
        let p_sel = selector("p");
        let a_sel = selector("a");

        let mut session = Session {
            number,
            index_url: s!(self.index_url),
            topics: IndexMap::new(),
        };

        for block in doc.select(&p_sel) {
            let anchors: Vec<_> = block.select(&a_sel).collect();
            let Some(first) = anchors.first() else { continue };
            let Some(topic_id) = first.attribute("id") else {
                debug!(session = number, text = %first.text(), "block without topic anchor");
                continue;
            };

            // Sub-links first, so a topic's list is only ever extended in encounter order.
            let mut refs = Vec::new();
            for link in &anchors[1..] {
                let Some(href) = link.attribute("href") else { continue };
                if is_vote_link(href) {
                    continue;
                }
                let Some(c) = QUERY_TOPIC.captures(href) else {
                    warn!(session = number, topic = topic_id, href, "no query-topic id in sub-link");
                    continue;
                };
                refs.extend(self.group_refs(href, &c["q"])?);
            }

            let topic = session.topics.entry(s!(topic_id)).or_insert_with(|| Topic {
                id: s!(topic_id),
                title: first.following_text().unwrap_or_default(),
                refs: Vec::new(),
            });
            topic.refs.extend(refs);
        }

        Ok(session)
    }

    /// Refs of group `qid` on the day page behind `href`. Empty when the page failed.
    fn group_refs(&mut self, href: &str, qid: &str) -> Result<Vec<InterventionRef>> {
        let Some(c) = PAGE_PATH.captures(href) else {
            error!(href, "no page name in sub-link");
            return Ok(Vec::new());
        };
        let url = match join_url(self.index_url, &c["page"]) {
            Ok(u) => u,
            Err(e) => {
                error!(href, error = %e, "bad sub-link");
                return Ok(Vec::new());
            }
        };

        if !self.pages.contains_key(&url) {
            let groups = match self.load_day_page(&url) {
                Ok(g) => Some(g),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    error!(url = %url, error = %e, "day page abandoned");
                    None
                }
            };
            self.pages.insert(url.clone(), groups);
        }

        match self.pages.get(&url) {
            Some(Some(groups)) => match groups.get(qid) {
                Some(refs) => Ok(refs.clone()),
                None => {
                    warn!(url = %url, qid, "no reference group on page");
                    Ok(Vec::new())
                }
            },
            _ => Ok(Vec::new()),
        }
    }

    fn load_day_page(&mut self, url: &str) -> Result<PageGroups> {
        let html = self.cache.fetch(url)?;
        let doc = Document::parse(&html);
        let date = page_date(&doc).map_err(|e| {
            CrawlError::parse("session day", format!("{url}: {e}"))
        })?;
        Ok(scan_groups(&doc, date))
    }
}

/// Session day from `<title>`, e.g. `Stenografický zápis 5. schůze, 15. června 2017`.
pub fn page_date(doc: &Document) -> Result<NaiveDate> {
    let title = doc
        .title()
        .ok_or_else(|| CrawlError::parse("page title", "missing <title>"))?
        .replace(NBSP, " ");
    let c = TITLE_DATE
        .captures(&title)
        .ok_or_else(|| CrawlError::parse("date in title", title.clone()))?;
    date_from(&c).ok_or_else(|| CrawlError::parse("date in title", title.clone()))
}

/// Walk anchors in document order: `id` opens a group, matching `href`s join it.
pub fn scan_groups(doc: &Document, date: NaiveDate) -> PageGroups {
    let a_sel = selector("a");
    let mut groups = PageGroups::new();
    let mut open: Option<String> = None;

    for a in doc.select(&a_sel) {
        if let Some(id) = a.attribute("id") {
            groups.entry(s!(id)).or_default();
            open = Some(s!(id));
            continue;
        }
        let (Some(qid), Some(href)) = (open.as_deref(), a.attribute("href")) else { continue };
        let Some(c) = INTERVENTION_LINK.captures(href.trim()) else { continue };
        if let Some(list) = groups.get_mut(qid) {
            list.push(InterventionRef {
                page_ref: s!(&c[0]),
                steno_page: s!(&c["page"]),
                ref_tag: s!(&c["tag"]),
                date,
            });
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_date_is_parsed() {
        let doc = Document::parse(
            "<html><head><title>PSP&nbsp;ČR, Stenografický zápis 5.&nbsp;schůze, 15.&nbsp;června&nbsp;2017</title></head></html>",
        );
        assert_eq!(page_date(&doc).unwrap(), NaiveDate::from_ymd_opt(2017, 6, 15).unwrap());
    }

    #[test]
    fn bad_title_is_parse_error() {
        let doc = Document::parse("<html><head><title>Úvodní strana</title></head></html>");
        assert!(matches!(page_date(&doc), Err(CrawlError::Parse { .. })));
    }

    #[test]
    fn groups_follow_id_anchors() {
        let doc = Document::parse(
            r#"<a href="s005001.htm#r1">orphan</a>
               <a id="q1"></a><a href="s005001.htm#r1">A</a><a href="s005001.htm#r2">B</a>
               <a href="../hlasy.sqw?g=1">hlasování</a>
               <a id="q2"></a><a href="s005002.htm#r7">C</a>"#,
        );
        let d = NaiveDate::from_ymd_opt(2017, 6, 15).unwrap();
        let g = scan_groups(&doc, d);
        assert_eq!(g.keys().collect::<Vec<_>>(), ["q1", "q2"]);
        let tags: Vec<_> = g["q1"].iter().map(|r| r.ref_tag.as_str()).collect();
        assert_eq!(tags, ["r1", "r2"]);
        assert_eq!(g["q2"][0].page_ref, "s005002.htm#r7");
        assert_eq!(g["q2"][0].steno_page, "s005002.htm");
        assert_eq!(g["q2"][0].date, d);
    }
}
