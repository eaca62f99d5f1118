// src/specs/miller.rs
//! Scraping *spec* for the biographical source (millercenter.org).
//!
//! Record shapes:
//! - `subdirectories` → ordered `(display name, href)` pairs, one per president.
//! - `fact_sheet` → ordered `(label, raw value)` pairs from the fast-facts panel.
//! - `description` / `quote` → raw text scalars.
//! - `key_event_count` → integer; 0 when the article body was never published.

use scraper::{ElementRef, Html};

use super::{sel, text_of};
use crate::error::Error;

/// Parse the origin's navigation structure into the ordered president →
/// subdirectory mapping. The presidents submenu is the *second* `ul.submenu`
/// inside the main navigation block.
pub fn subdirectories(doc: &Html) -> Result<Vec<(String, String)>, Error> {
    let nav = doc
        .select(&sel(r#"nav[aria-labelledby="block-mainnavigation-3-menu"]"#))
        .next()
        .ok_or_else(|| Error::Discovery(s!("main navigation block not found")))?;
    let submenu = nav
        .select(&sel("ul.submenu"))
        .nth(1)
        .ok_or_else(|| Error::Discovery(s!("presidents submenu not found")))?;

    let mut out = Vec::new();
    for a in submenu.select(&sel("a")) {
        let href = a
            .value()
            .attr("href")
            .ok_or_else(|| Error::Discovery(s!("president link without href")))?;
        out.push((text_of(a).trim().to_string(), s!(href)));
    }
    if out.is_empty() {
        return Err(Error::Discovery(s!("presidents submenu has no links")));
    }
    Ok(out)
}

/// Read the fast-facts panel as (label, value) pairs. Whitespace-only nodes
/// fall away with element iteration; the leading heading node is skipped.
/// Values are kept raw — a president with non-consecutive terms carries
/// doubled, newline-separated values here until the correction splits them.
pub fn fact_sheet(doc: &Html, entity: &str) -> Result<Vec<(String, String)>, Error> {
    let panel = doc
        .select(&sel("div.president-main-wrapper div.fast-facts-wrapper"))
        .next()
        .ok_or_else(|| Error::extraction(entity, "fast facts panel"))?;

    let mut facts = Vec::new();
    for fact in panel.children().filter_map(ElementRef::wrap).skip(1) {
        let label = fact.select(&sel("label")).next();
        let value = fact.select(&sel("div")).next();
        let (Some(label), Some(value)) = (label, value) else {
            tracing::debug!(entity, "skipping fast-fact node without label/value");
            continue;
        };
        facts.push((text_of(label).trim().to_string(), text_of(value)));
    }
    if facts.is_empty() {
        return Err(Error::extraction(entity, "fast facts panel is empty"));
    }
    Ok(facts)
}

/// First paragraph of the copy panel.
pub fn description(doc: &Html, entity: &str) -> Result<String, Error> {
    let p = doc
        .select(&sel("div.copy-wrapper p"))
        .next()
        .ok_or_else(|| Error::extraction(entity, "description paragraph"))?;
    Ok(text_of(p))
}

/// First content node of the quote block.
pub fn quote(doc: &Html, entity: &str) -> Result<String, Error> {
    let block = doc
        .select(&sel("blockquote.president-quote"))
        .next()
        .ok_or_else(|| Error::extraction(entity, "quote block"))?;
    block
        .children()
        .find_map(|node| {
            let text = node.value().as_text()?;
            let text: &str = &text.text;
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| s!(trimmed))
        })
        .ok_or_else(|| Error::extraction(entity, "quote block has no text"))
}

/// Count emphasized inline elements in the key-events article body — a proxy
/// for distinct notable events. An entirely absent body is a known data gap
/// (nothing published yet), so it counts as 0 rather than erroring.
pub fn key_event_count(doc: &Html) -> i64 {
    match doc.select(&sel("div.article-wysiwyg-body")).next() {
        Some(body) => {
            let bold = body.select(&sel("strong")).count() + body.select(&sel("b")).count();
            bold as i64
        }
        None => 0,
    }
}
