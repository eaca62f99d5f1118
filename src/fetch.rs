// src/fetch.rs
// Document retrieval: resolve (origin, relative path) to a parsed HTML tree.
// No retry/backoff and no memoization — callers re-fetch what they need and a
// full re-run is the recovery path.

use std::collections::HashMap;
use std::time::Duration;

use scraper::Html;

use crate::error::Error;

pub const MILLER_ORIGIN: &str = "https://millercenter.org";
pub const POTUS_ORIGIN: &str = "https://www.potus.com";

const USER_AGENT: &str = concat!("prez_scrape/", env!("CARGO_PKG_VERSION"));
const TIMEOUT_SECS: u64 = 15;

/// Source of parsed documents. The scrapers only ever see this trait, so the
/// integration tests can run the whole pipeline against captured fixture
/// pages without touching the network.
pub trait Fetcher {
    fn fetch(&self, origin: &str, path: &str) -> Result<Html, Error>;
}

/// Paths discovered on the pages are sometimes site-relative ("/president/…")
/// and sometimes already absolute; accept both.
pub fn join_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        s!(path)
    } else {
        format!("{}/{}", origin.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

/* ---------------- Live HTTP ---------------- */

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Fetch { url: s!(), reason: e.to_string() })?;
        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, origin: &str, path: &str) -> Result<Html, Error> {
        let url = join_url(origin, path);
        let fetch_err = |reason: String| Error::Fetch { url: url.clone(), reason };

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| fetch_err(e.to_string()))?
            .error_for_status()
            .map_err(|e| fetch_err(e.to_string()))?;
        let body = response.text().map_err(|e| fetch_err(e.to_string()))?;
        Ok(Html::parse_document(&body))
    }
}

/* ---------------- Offline fixtures ---------------- */

/// In-memory page set for offline runs and tests.
#[derive(Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, origin: &str, path: &str, html: &str) {
        self.pages.insert(join_url(origin, path), s!(html));
    }
}

impl Fetcher for FixtureFetcher {
    fn fetch(&self, origin: &str, path: &str) -> Result<Html, Error> {
        let url = join_url(origin, path);
        match self.pages.get(&url) {
            Some(body) => Ok(Html::parse_document(body)),
            None => Err(Error::Fetch { url, reason: s!("no fixture page") }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_handles_relative_and_absolute_paths() {
        assert_eq!(
            join_url(MILLER_ORIGIN, "/president/cleveland"),
            "https://millercenter.org/president/cleveland"
        );
        assert_eq!(
            join_url(POTUS_ORIGIN, "https://www.potus.com/grover-cleveland/"),
            "https://www.potus.com/grover-cleveland/"
        );
        assert_eq!(join_url(MILLER_ORIGIN, ""), "https://millercenter.org/");
    }

    #[test]
    fn fixture_miss_is_a_fetch_error() {
        let f = FixtureFetcher::new();
        assert!(matches!(
            f.fetch(MILLER_ORIGIN, "/president/nobody"),
            Err(Error::Fetch { .. })
        ));
    }
}
