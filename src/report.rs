// src/report.rs
//! Join topics × steno pages × speakers into output rows.
//!
//! Rows come out in topic order, then reference order within the topic. The
//! `order` column is the reference's position in its topic (1-based), so a row
//! omitted for missing data leaves a gap rather than renumbering the rest.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::{error, warn};

use crate::error::CrawlError;
use crate::model::{fmt_date, Session, Speaker, SpeakerRegistry, StenoPage};
use crate::specs::speaker::speaker_url;

pub const INDEX_HEADERS: [&str; 8] =
    ["session", "date", "topic_idx", "topic_str", "order", "name", "steno_name", "file_name"];

pub const ROSTER_HEADERS: [&str; 8] =
    ["name", "titles", "function", "steno_name", "sex", "party", "birthdate", "web_page"];

pub fn headers(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| s!(*c)).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub session: u32,
    pub date: NaiveDate,
    pub topic_idx: String,
    pub topic_str: String,
    pub order: usize,
    pub name: String,
    pub steno_name: String,
    pub file_name: String,
    pub speaker_key: String,
    pub text: String,
}

impl ReportRow {
    /// Cells in [`INDEX_HEADERS`] order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.session.to_string(),
            fmt_date(self.date),
            self.topic_idx.clone(),
            self.topic_str.clone(),
            self.order.to_string(),
            self.name.clone(),
            self.steno_name.clone(),
            self.file_name.clone(),
        ]
    }
}

/// `s_005_20170615_t_012_i_001_Jan_Novak.txt`
pub fn file_name(session: u32, date: &str, topic_id: &str, order: usize, steno_name: &str) -> String {
    format!("s_{session:03}_{date}_t_{topic_id:0>3}_i_{order:03}_{steno_name}.txt")
}

/// Rows of one session. `pages` maps steno page name → its interventions.
pub fn assemble(session: &Session, pages: &HashMap<String, StenoPage>, speakers: &SpeakerRegistry) -> Vec<ReportRow> {
    let mut rows = Vec::with_capacity(session.ref_count());

    for topic in session.topics.values() {
        for (idx, r) in topic.refs.iter().enumerate() {
            let order = idx + 1;

            let Some(iv) = pages.get(&r.steno_page).and_then(|p| p.get(&r.ref_tag)) else {
                let e = CrawlError::missing("ref tag", format!("{} in {}", r.ref_tag, r.steno_page));
                error!(session = session.number, topic = %topic.id, order, error = %e, "row omitted");
                continue;
            };
            let Some(sp) = speakers.get(&iv.speaker_key) else {
                let e = CrawlError::missing("speaker", iv.speaker_key.clone());
                error!(session = session.number, topic = %topic.id, tag = %r.ref_tag, error = %e, "row omitted");
                continue;
            };
            if !sp.resolved {
                warn!(key = %sp.key, tag = %r.ref_tag, "speaker unresolved, using steno name");
            }

            let date = r.date_str();
            rows.push(ReportRow {
                session: session.number,
                date: r.date,
                topic_idx: topic.id.clone(),
                topic_str: topic.title.clone(),
                order,
                name: sp.display_name(),
                steno_name: iv.steno_name.clone(),
                file_name: file_name(session.number, &date, &topic.id, order, &iv.steno_name),
                speaker_key: iv.speaker_key.clone(),
                text: iv.text.clone(),
            });
        }
    }
    rows
}

/// Speakers of `rows`, each once, in first-appearance order.
pub fn roster<'a>(rows: &[ReportRow], speakers: &'a SpeakerRegistry) -> Vec<&'a Speaker> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|r| seen.insert(r.speaker_key.as_str()))
        .filter_map(|r| speakers.get(&r.speaker_key))
        .collect()
}

/// Cells in [`ROSTER_HEADERS`] order.
pub fn roster_cells(sp: &Speaker) -> Vec<String> {
    vec![
        sp.display_name(),
        sp.titles.clone(),
        sp.function.clone(),
        sp.steno_name.clone(),
        sp.sex.map(|s| s!(s.as_str())).unwrap_or_default(),
        sp.group.clone(),
        sp.birthdate_str(),
        speaker_url(&sp.key),
    ]
}
