// src/specs/steno.rs
//! Scraping *spec* for a steno page (`s005001.htm`).
//!
//! Transcript text lives in `<p align="justify">` blocks. A block that starts
//! a turn carries the speaker anchor:
//!
//! ```html
//! <p align="justify"><a id="r2" href="../../../../sqw/detail.sqw?id=5462">Poslanec Jan Novák</a>: Děkuji...</p>
//! ```
//!
//! Blocks without one continue the open turn. Text before the first speaker
//! anchor has no owner and is dropped.

use tracing::{debug, warn};

use crate::config::dialect::is_vote_link;
use crate::core::html::{selector, Document, Node};
use crate::core::net::{join_url, Transport};
use crate::core::sanitize::{is_blank, normalize_text, steno_name};
use crate::error::Result;
use crate::model::{Intervention, StenoPage};
use crate::specs::speaker::normalize_key;
use crate::store::PageCache;

/// Fetch `steno_page` (relative to the session index) and segment it.
pub fn fetch_page<T: Transport>(
    cache: &mut PageCache<T>,
    index_url: &str,
    steno_page: &str,
) -> Result<StenoPage> {
    let url = join_url(index_url, steno_page)?;
    let html = cache.fetch(&url)?;
    let page = extract_page(&html);
    debug!(url = %url, interventions = page.len(), "steno page extracted");
    Ok(page)
}

/// Turn being accumulated.
#[derive(Default)]
struct Open {
    tag: String,
    steno_name: String,
    key: String,
    text: Vec<String>,
}

impl Open {
    fn flush_into(&mut self, page: &mut StenoPage) {
        let done = std::mem::take(self);
        if done.tag.is_empty() {
            if !done.text.is_empty() {
                debug!(blocks = done.text.len(), "text before first speaker dropped");
            }
            return;
        }
        if page.contains_key(&done.tag) {
            warn!(tag = %done.tag, "duplicate ref tag on page, keeping first");
            return;
        }
        page.insert(
            done.tag,
            Intervention {
                steno_name: done.steno_name,
                text: done.text.join(" "),
                speaker_key: done.key,
            },
        );
    }
}

pub fn extract_page(html: &str) -> StenoPage {
    let doc = Document::parse(html);
    let p_sel = selector("p");
    let a_sel = selector("a");

    let mut page = StenoPage::new();
    let mut open = Open::default();

    for p in doc.select(&p_sel) {
        let justified = p.attribute("align").is_some_and(|a| a.eq_ignore_ascii_case("justify"));
        if !justified {
            continue;
        }
        let raw = p.text();
        if is_blank(&raw) {
            continue;
        }

        let text = match p.select(&a_sel).find(|a| is_speaker_anchor(*a)) {
            Some(a) => {
                open.flush_into(&mut page);
                open.tag = a.attribute("id").map(str::to_owned).unwrap_or_default();
                open.steno_name = steno_name(&a.text());
                open.key = a.attribute("href").map(normalize_key).unwrap_or_default();
                p.text_without(a)
            }
            None => raw,
        };

        let text = normalize_text(&text);
        if !text.is_empty() {
            open.text.push(text);
        }
    }
    open.flush_into(&mut page);
    page
}

/// `id` and `href`, and not pointing at a vote tally.
fn is_speaker_anchor(a: Node) -> bool {
    matches!(
        (a.attribute("id"), a.attribute("href")),
        (Some(id), Some(href)) if !id.is_empty() && !is_vote_link(href)
    )
}
