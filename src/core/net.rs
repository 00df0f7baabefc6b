// src/core/net.rs
// Blocking HTTP GET. The crawl is sequential; one request at a time.

use std::time::Duration;

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{CrawlError, Result};

/// Anything that can turn a URL into a page body.
/// The cache sits on top of this; tests swap in an in-memory map.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CrawlError::Network { url: s!(), reason: e.to_string() })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    /// Body is decoded using the response charset (the archive serves windows-1250).
    fn get(&self, url: &str) -> Result<String> {
        let net_err = |e: reqwest::Error| CrawlError::Network { url: s!(url), reason: e.to_string() };

        let resp = self.client.get(url).send().map_err(net_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CrawlError::Status { url: s!(url), status: status.as_u16() });
        }
        resp.text().map_err(net_err)
    }
}

/// Resolve `rel` against `base` the way a browser would.
pub fn join_url(base: &str, rel: &str) -> Result<String> {
    let base = url::Url::parse(base).map_err(|e| CrawlError::parse("url", format!("{base}: {e}")))?;
    base.join(rel)
        .map(String::from)
        .map_err(|e| CrawlError::parse("url", format!("{rel}: {e}")))
}
