// src/model.rs
//! Session → Topic → InterventionRef skeleton, extracted interventions and speakers.

use chrono::NaiveDate;
use indexmap::IndexMap;

/// One discovered link to an intervention. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterventionRef {
    /// `s005001.htm#r2`
    pub page_ref: String,
    /// `s005001.htm`
    pub steno_page: String,
    /// `r2`
    pub ref_tag: String,
    /// Session day of the page the link was found on
    pub date: NaiveDate,
}

impl InterventionRef {
    pub fn date_str(&self) -> String {
        fmt_date(self.date)
    }
}

pub fn fmt_date(d: NaiveDate) -> String {
    d.format("%Y%m%d").to_string()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Topic {
    /// Anchor id from the session index
    pub id: String,
    pub title: String,
    /// Encounter order; determines intervention numbering
    pub refs: Vec<InterventionRef>,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    pub number: u32,
    pub index_url: String,
    /// Insertion order is index-page order; never re-sorted
    pub topics: IndexMap<String, Topic>,
}

impl Session {
    /// Distinct steno pages in first-reference order.
    pub fn steno_pages(&self) -> Vec<&str> {
        let mut seen = indexmap::IndexSet::new();
        for r in self.topics.values().flat_map(|t| &t.refs) {
            seen.insert(r.steno_page.as_str());
        }
        seen.into_iter().collect()
    }

    pub fn ref_count(&self) -> usize {
        self.topics.values().map(|t| t.refs.len()).sum()
    }
}

/// One contiguous spoken turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intervention {
    /// Display name with spaces/commas as underscores
    pub steno_name: String,
    pub text: String,
    pub speaker_key: String,
}

/// Interventions of one steno page keyed by ref tag.
pub type StenoPage = IndexMap<String, Intervention>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Female => "F",
            Sex::Male => "M",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Speaker {
    /// Biography page reference; the identity of the speaker
    pub key: String,
    pub steno_name: String,
    pub page_name: String,
    pub name: String,
    pub titles: String,
    pub function: String,
    pub sex: Option<Sex>,
    pub group: String,
    pub birthdate: Option<NaiveDate>,
    pub resolved: bool,
}

impl Speaker {
    pub fn stub(key: &str, steno_name: &str) -> Self {
        Self { key: s!(key), steno_name: s!(steno_name), ..Default::default() }
    }

    pub fn birthdate_str(&self) -> String {
        self.birthdate.map(fmt_date).unwrap_or_default()
    }

    /// Best available display name; falls back to the steno name for stubs.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            self.steno_name.replace('_', " ")
        } else {
            self.name.clone()
        }
    }
}

/// Speakers of a run, keyed by speaker key. Owned by the caller and passed
/// into each session; a key maps to exactly one record.
#[derive(Clone, Debug, Default)]
pub struct SpeakerRegistry {
    speakers: IndexMap<String, Speaker>,
}

impl SpeakerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stub the first time `key` is seen. Returns true if it was new.
    pub fn ensure_stub(&mut self, key: &str, steno_name: &str) -> bool {
        if self.speakers.contains_key(key) {
            return false;
        }
        self.speakers.insert(s!(key), Speaker::stub(key, steno_name));
        true
    }

    /// Replace a stub with its resolved record. At most once per key.
    pub fn complete(&mut self, speaker: Speaker) -> bool {
        match self.speakers.get_mut(&speaker.key) {
            Some(slot) if !slot.resolved => {
                *slot = Speaker { resolved: true, ..speaker };
                true
            }
            _ => false,
        }
    }

    /// Take over a record from another registry unless the key is already known.
    pub fn adopt(&mut self, speaker: Speaker) -> bool {
        if self.speakers.contains_key(&speaker.key) {
            return false;
        }
        self.speakers.insert(speaker.key.clone(), speaker);
        true
    }

    pub fn get(&self, key: &str) -> Option<&Speaker> {
        self.speakers.get(key)
    }

    /// Keys still waiting for their biography.
    pub fn pending(&self) -> Vec<String> {
        self.speakers.values().filter(|s| !s.resolved).map(|s| s.key.clone()).collect()
    }

    /// Fold a session-scoped registry into this one. Resolved records win over stubs.
    pub fn merge(&mut self, other: SpeakerRegistry) {
        for (key, sp) in other.speakers {
            match self.speakers.get_mut(&key) {
                Some(slot) if !slot.resolved && sp.resolved => *slot = sp,
                Some(_) => {}
                None => {
                    self.speakers.insert(key, sp);
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Speaker> {
        self.speakers.values()
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }
}
