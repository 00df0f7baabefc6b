// src/config/dialect.rs
//! Pattern tables for the archive and its biography pages.
//!
//! Named captures used throughout:
//! - `d`, `m`, `y`: day, month, four-digit year. `m` is either digits or a
//!   Czech month name in the genitive (see [`MONTHS`]).
//! - `q`: query-topic id (`q12`)
//! - `page`, `tag`: steno page (`s001002.htm`) and anchor (`r3`)
//! - `session`: session number in an archive index link
//! - `group`: electoral list a member was elected on
//!
//! A new page dialect is a new row here, not new control flow.

use std::sync::LazyLock;
use chrono::NaiveDate;
use regex::Regex;

use super::consts::GOV_HOSTS;

/// Genitive month names as they appear in transcript titles.
pub const MONTHS: &[(&str, u32)] = &[
    ("ledna", 1),
    ("února", 2),
    ("března", 3),
    ("dubna", 4),
    ("května", 5),
    ("června", 6),
    ("července", 7),
    ("srpna", 8),
    ("září", 9),
    ("října", 10),
    ("listopadu", 11),
    ("prosince", 12),
];

pub fn month_number(name: &str) -> Option<u32> {
    let name = name.trim().to_lowercase();
    MONTHS.iter().find(|(m, _)| *m == name).map(|(_, n)| *n)
}

/// Date from `d`/`m`/`y` captures; `m` may be digits or a month name.
pub fn date_from(c: &regex::Captures) -> Option<NaiveDate> {
    let day: u32 = c.name("d")?.as_str().parse().ok()?;
    let m = c.name("m")?.as_str();
    let month = m.parse::<u32>().ok().or_else(|| month_number(m))?;
    let year: i32 = c.name("y")?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn re(pat: &str) -> Regex {
    // Patterns are compile-time constants covered by the unit tests below.
    Regex::new(pat).unwrap_or_else(|e| panic!("bad dialect pattern {pat}: {e}"))
}

/// `Stenografický zápis 5. schůze, 15. června 2017`
pub static TITLE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"Stenografický zápis \d+\. schůze, (?P<d>\d{1,2})\.\s*(?P<m>\S+)\s+(?P<y>\d{4})")
});

/// Sub-link on a session index: `2017/05-1.html#q3`
pub static QUERY_TOPIC: LazyLock<Regex> = LazyLock::new(|| re(r"^.*html?#(?P<q>q\d+)$"));

/// Physical page part of a sub-link (everything up to `.htm`/`.html`)
pub static PAGE_PATH: LazyLock<Regex> = LazyLock::new(|| re(r"^(?P<page>.*?\.html?)"));

/// Intervention link on a day page: `s005001.htm#r2`
pub static INTERVENTION_LINK: LazyLock<Regex> =
    LazyLock::new(|| re(r"^(?P<page>s\d+\.html?)#(?P<tag>r\d+)$"));

/// Session link on the term index: `005schuz/index.htm`
pub static SESSION_LINK: LazyLock<Regex> =
    LazyLock::new(|| re(r"^(?P<session>\d+)schuz/index\.htm$"));

/// Member biography key: `sqw/detail.sqw?id=5462`
pub static MEMBER_KEY: LazyLock<Regex> = LazyLock::new(|| re(r"detail\.sqw\?id=(?P<id>\d+)"));

/// Hrefs pointing at vote tallies / voting history, never at a speaker.
pub const VOTE_MARKERS: &[&str] = &["hlasy.sqw", "hlasovani", "hlasy.htm"];

pub fn is_vote_link(href: &str) -> bool {
    let lc = href.to_ascii_lowercase();
    VOTE_MARKERS.iter().any(|m| lc.contains(m))
}

/// One way of reading a biography caption.
pub struct CaptionPattern {
    pub name: &'static str,
    /// Caption must contain this (case-insensitive) for the row to apply
    pub marker: Option<&'static str>,
    pub pattern: &'static LazyLock<Regex>,
}

/// `Narozen: 2. 9. 1954 ... Zvolen na kandidátce: ANO 2011`
pub static BORN_ELECTED: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?s)Narozen[a]?:\s*(?P<d>\d{1,2})\.\s*(?P<m>\d{1,2})\.\s*(?P<y>\d{4}).*?[Zz]volen[a]?\s+na\s+kandidátce:\s*(?P<group>[^\n]+)")
});

/// `Narozena: 12.3.1970`
pub static BORN: LazyLock<Regex> = LazyLock::new(|| {
    re(r"Narozen[a]?:\s*(?P<d>\d{1,2})\.\s*(?P<m>\d{1,2})\.\s*(?P<y>\d{4})")
});

/// Tried in order; first row whose marker is present and whose pattern matches wins.
pub static CAPTION_PATTERNS: [CaptionPattern; 2] = [
    CaptionPattern { name: "born+elected", marker: Some("volen"), pattern: &BORN_ELECTED },
    CaptionPattern { name: "born", marker: None, pattern: &BORN },
];

/// Role keywords, checked female first. First match wins.
pub const FEMALE_ROLES: &[&str] = &[
    "poslankyně", "ministryně", "místopředsedkyně", "předsedkyně", "senátorka",
    "zpravodajka", "navrhovatelka", "členka", "hejtmanka", "primátorka",
    "starostka", "náměstkyně", "guvernérka", "ochránkyně", "paní",
];
pub const MALE_ROLES: &[&str] = &[
    "poslanec", "ministr", "místopředseda", "předseda", "senátor",
    "zpravodaj", "navrhovatel", "člen", "hejtman", "primátor",
    "starosta", "náměstek", "guvernér", "ochránce", "prezident", "pan",
];

/// Which biography layout a speaker key points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeakerDialect {
    /// Central government office; heading only
    Government,
    /// Chamber member detail page; heading + caption
    Member,
}

impl SpeakerDialect {
    pub fn classify(key: &str) -> Option<Self> {
        let lc = key.to_ascii_lowercase();
        let host = lc
            .split("://")
            .nth(1)
            .and_then(|rest| rest.split('/').next())
            .unwrap_or("");
        if GOV_HOSTS.contains(&host) {
            Some(SpeakerDialect::Government)
        } else if MEMBER_KEY.is_match(key) {
            Some(SpeakerDialect::Member)
        } else {
            None
        }
    }
}
