// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use steno_scrape::core::net::Transport;
use steno_scrape::error::{CrawlError, Result};

/// In-memory site. Unknown URLs answer 404. Every call is recorded.
#[derive(Default)]
pub struct MapTransport {
    pages: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl MapTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.borrow().iter().filter(|u| *u == url).count()
    }
}

impl Transport for MapTransport {
    fn get(&self, url: &str) -> Result<String> {
        self.calls.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| CrawlError::Status { url: url.to_string(), status: 404 })
    }
}

pub const TERM_INDEX: &str = "http://www.psp.cz/eknih/2017ps/stenprot/index.htm";
pub const SESSION_INDEX: &str = "http://www.psp.cz/eknih/2017ps/stenprot/005schuz/index.htm";
pub const DAY_PAGE: &str = "http://www.psp.cz/eknih/2017ps/stenprot/005schuz/5-1.html";
pub const STENO_1: &str = "http://www.psp.cz/eknih/2017ps/stenprot/005schuz/s005001.htm";
pub const STENO_2: &str = "http://www.psp.cz/eknih/2017ps/stenprot/005schuz/s005002.htm";
pub const BIO_NOVAK: &str = "http://www.psp.cz/sqw/detail.sqw?id=1";
pub const BIO_CERNOCHOVA: &str = "http://www.psp.cz/sqw/detail.sqw?id=2";
pub const BIO_BABIS: &str = "https://www.vlada.cz/cz/vlada/babis/";

pub fn day_title(day: &str) -> String {
    format!("<html><head><title>PSP ČR, Stenografický zápis 5. schůze, {day}</title></head>")
}

pub fn term_index() -> String {
    r#"<html><body>
        <a href="005schuz/index.htm">5. schůze</a>
        <a href="../../index.htm">zpět</a>
    </body></html>"#
        .to_string()
}

/// Two topics; both point into the same day page.
pub fn session_index() -> String {
    r#"<html><body>
        <p><a id="1"></a><b>1. Vládní návrh zákona o státním rozpočtu</b>
           <a href="5-1.html#q1">15. června 2017</a>
           <a href="../../../../sqw/hlasy.sqw?G=66180">hlasování 5</a></p>
        <p>Bez kotvy, jen text.</p>
        <p><a id="2"></a><b>2. Návrh zákona o daních z příjmů</b>
           <a href="5-1.html#q2">15. června 2017</a></p>
    </body></html>"#
        .to_string()
}

pub fn day_page() -> String {
    format!(
        r#"{}<body>
        <a id="q1"></a><a href="s005001.htm#r1">Novák</a> <a href="s005001.htm#r2">Babiš</a>
        <a id="q2"></a><a href="s005001.htm#r3">Novák</a> <a href="s005002.htm#r1">Černochová</a>
        </body></html>"#,
        day_title("15. června 2017")
    )
}

pub fn steno_1() -> String {
    r#"<html><body>
        <p align="justify"><a id="r1" href="../../../../sqw/detail.sqw?id=1">Poslanec Jan Novák</a>: Vážený pane předsedo,</p>
        <p align="justify">děkuji za slovo.</p>
        <p align="justify"><a id="r2" href="https://www.vlada.cz/cz/vlada/babis/">Ministr financí ČR, Andrej Babiš</a>: Děkuji.</p>
        <p align="justify">&nbsp;</p>
        <p align="justify"><a id="r3" href="../../../../sqw/detail.sqw?id=1">Poslanec Jan Novák</a>: Ještě jednou.</p>
    </body></html>"#
        .to_string()
}

pub fn steno_2() -> String {
    r#"<html><body>
        <p align="justify"><a id="r1" href="../../../../sqw/detail.sqw?id=2">Poslankyně Jana Černochová</a>: Dobrý den.</p>
    </body></html>"#
        .to_string()
}

pub fn bio_novak() -> String {
    r#"<html><body><h1>Ing. Jan Novák</h1>
        <div class="figcaption">Narozen: 1. 2. 1960<br>Zvolen na kandidátce: ODS</div>
    </body></html>"#
        .to_string()
}

pub fn bio_cernochova() -> String {
    r#"<html><body><h1>Mgr. Jana Černochová</h1>
        <div class="figcaption">Narozena: 26. 10. 1973<br>Zvolena na kandidátce: ODS</div>
    </body></html>"#
        .to_string()
}

pub fn bio_babis() -> String {
    "<html><body><h1>Ing. Andrej Babiš</h1><p>Ministr financí</p></body></html>".to_string()
}

/// The whole session-5 site.
pub fn site() -> MapTransport {
    MapTransport::new()
        .with(TERM_INDEX, &term_index())
        .with(SESSION_INDEX, &session_index())
        .with(DAY_PAGE, &day_page())
        .with(STENO_1, &steno_1())
        .with(STENO_2, &steno_2())
        .with(BIO_NOVAK, &bio_novak())
        .with(BIO_CERNOCHOVA, &bio_cernochova())
        .with(BIO_BABIS, &bio_babis())
}
