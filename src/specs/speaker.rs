// src/specs/speaker.rs
//! Scraping *spec* for speaker biography pages.
//!
//! A speaker key is the biography href from the steno page with relative
//! prefixes removed. Two layouts exist:
//! - chamber members: `sqw/detail.sqw?id=5462` on the archive host. `<h1>`
//!   holds the name with academic titles, a caption block holds birth date
//!   and the electoral list.
//! - government members: an absolute link to the government site. Only the
//!   `<h1>` is usable.
//!
//! Name decomposition compares the heading with the steno name token by
//! token. Tokens present in both are the person's name; heading-only tokens
//! are titles; steno-only tokens are the function (`Ministr financí`).

use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::config::consts::{CACHE_STRIP_PREFIX, HOST};
use crate::config::dialect::{date_from, SpeakerDialect, CAPTION_PATTERNS, FEMALE_ROLES, MALE_ROLES};
use crate::core::html::{selector, Document};
use crate::core::net::Transport;
use crate::core::sanitize::{normalize_ws, steno_name_words, tokens, NBSP};
use crate::error::{CrawlError, Result};
use crate::model::{Sex, Speaker, SpeakerRegistry};
use crate::store::PageCache;

/// Speaker key from a steno-page href: `../../../../sqw/detail.sqw?id=1` → `sqw/detail.sqw?id=1`.
pub fn normalize_key(href: &str) -> String {
    let trimmed = href.trim();
    // Scheme-relative links resolve against the http archive
    let absolute = match trimmed.strip_prefix("//") {
        Some(rest) => join!("http://", rest),
        None => s!(trimmed),
    };
    let mut k = absolute.as_str();
    for prefix in [CACHE_STRIP_PREFIX, "https://www.psp.cz/"] {
        if let Some(rest) = k.strip_prefix(prefix) {
            k = rest;
        }
    }
    loop {
        if let Some(rest) = k.strip_prefix("../").or_else(|| k.strip_prefix("./")) {
            k = rest;
        } else if let Some(rest) = k.strip_prefix('/') {
            k = rest;
        } else {
            break;
        }
    }
    s!(k)
}

pub fn speaker_url(key: &str) -> String {
    if key.starts_with("http://") || key.starts_with("https://") {
        s!(key)
    } else {
        format!("http://{HOST}/{key}")
    }
}

pub fn resolve_speaker<T: Transport>(
    cache: &mut PageCache<T>,
    key: &str,
    steno_name: &str,
) -> Result<Speaker> {
    let dialect = SpeakerDialect::classify(key)
        .ok_or_else(|| CrawlError::parse("speaker dialect", key))?;
    let html = cache.fetch(&speaker_url(key))?;
    parse_speaker(dialect, key, steno_name, &html)
}

pub fn parse_speaker(dialect: SpeakerDialect, key: &str, steno_name: &str, html: &str) -> Result<Speaker> {
    let doc = Document::parse(html);
    let page_name = doc
        .first(&selector("h1"))
        .map(|h| normalize_ws(&h.text().replace(NBSP, " ")))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CrawlError::parse("biography heading", key))?;

    let (name, titles, function) = decompose_name(&page_name, steno_name);
    let mut sp = Speaker {
        key: s!(key),
        steno_name: s!(steno_name),
        sex: infer_sex(&function),
        page_name,
        name,
        titles,
        function,
        ..Default::default()
    };

    if dialect == SpeakerDialect::Member {
        read_caption(&doc, &mut sp);
    }
    Ok(sp)
}

fn read_caption(doc: &Document, sp: &mut Speaker) {
    let Some(caption) = doc.first(&selector("div.figcaption, figcaption, .caption")) else {
        warn!(key = %sp.key, "no caption on member page");
        return;
    };
    let text = caption.text_lines().replace(NBSP, " ");
    let lc = text.to_lowercase();

    for row in &CAPTION_PATTERNS {
        if row.marker.is_some_and(|m| !lc.contains(m)) {
            continue;
        }
        let Some(c) = row.pattern.captures(&text) else { continue };
        sp.birthdate = date_from(&c);
        if let Some(g) = c.name("group") {
            sp.group = normalize_ws(g.as_str());
        }
        debug!(key = %sp.key, pattern = row.name, "caption parsed");
        return;
    }
    warn!(key = %sp.key, caption = %normalize_ws(&text), "caption not understood");
}

/// `(name, titles, function)` from the page heading and the steno name.
pub fn decompose_name(page_name: &str, steno_name: &str) -> (String, String, String) {
    let steno = steno_name_words(steno_name);
    // `Jan Novák, CSc.` compares as `Novák`
    let clean = |s: &str| -> Vec<String> {
        tokens(s).into_iter().map(|t| t.trim_matches(',')).filter(|t| !t.is_empty()).map(str::to_owned).collect()
    };
    let page_tokens = clean(page_name);
    let steno_tokens = clean(&steno);
    let page_tokens: Vec<&str> = page_tokens.iter().map(String::as_str).collect();
    let steno_tokens: Vec<&str> = steno_tokens.iter().map(String::as_str).collect();

    let page_set: HashSet<&str> = page_tokens.iter().copied().collect();
    let steno_set: HashSet<&str> = steno_tokens.iter().copied().collect();

    let name: Vec<&str> = page_tokens.iter().copied().filter(|t| steno_set.contains(t)).collect();
    let titles: Vec<&str> = page_tokens.iter().copied().filter(|t| !steno_set.contains(t)).collect();
    let function: Vec<&str> = steno_tokens.iter().copied().filter(|t| !page_set.contains(t)).collect();

    (name.join(" "), titles.join(" "), function.join(" "))
}

/// Female keywords first; first hit wins.
pub fn infer_sex(function: &str) -> Option<Sex> {
    let words: Vec<String> = tokens(function).iter().map(|t| t.to_lowercase()).collect();
    let hit = |roles: &[&str]| roles.iter().any(|r| words.iter().any(|w| w == r));
    if hit(FEMALE_ROLES) {
        Some(Sex::Female)
    } else if hit(MALE_ROLES) {
        Some(Sex::Male)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub resolved: usize,
    pub failed: usize,
}

/// Complete every stub in `registry`. A speaker that cannot be fetched or
/// parsed stays a stub; only disk errors abort.
pub fn resolve_pending<T: Transport>(cache: &mut PageCache<T>, registry: &mut SpeakerRegistry) -> Result<ResolveStats> {
    let mut stats = ResolveStats::default();
    for key in registry.pending() {
        let steno = registry.get(&key).map(|s| s.steno_name.clone()).unwrap_or_default();
        match resolve_speaker(cache, &key, &steno) {
            Ok(sp) => {
                registry.complete(sp);
                stats.resolved += 1;
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                error!(key = %key, error = %e, "speaker left unresolved");
                stats.failed += 1;
            }
        }
    }
    info!(resolved = stats.resolved, failed = stats.failed, "speakers resolved");
    Ok(stats)
}
