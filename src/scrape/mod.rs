// src/scrape/mod.rs
//! Per-source scrapers: orchestration over the pure parsers in `specs`.
//!
//! Each scraper owns the raw record families for its site and the correction
//! routines for that site's known anomalies. Extraction is synchronous and
//! per-president: one fetch-and-extract completes before the next begins.

mod miller;
mod potus;

pub use miller::MillerScrape;
pub use potus::PotusScrape;
