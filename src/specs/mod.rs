// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific scraping specifications. Each spec focuses on a single
//! page/endpoint and encodes *where the ground truth lives in the HTML* and
//! *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of already-fetched documents (`scraper::Html`).
//! - **Selector choice & precedence** (e.g. the second `ul.submenu` inside the
//!   main navigation is the presidents list; the first is a different section).
//! - **Tolerant extraction**: whitespace-only nodes and header/spacer table
//!   rows are skipped, not errors.
//!
//! ## What does **not** live here
//! - **Networking** — callers fetch via `fetch::Fetcher` and pass the tree in.
//! - **Per-president exception rules** — those live in `quirks` and the
//!   correction routines of the `scrape` layer.
//! - **Cross-page merging/typing** — `merge` and `normalize` own that.
//!
//! ## Conventions & invariants
//! - Stable record shapes per page, documented on each function, so the rest
//!   of the pipeline can rely on them.
//! - Specs are testable **offline** against fixture HTML; no spec ever opens
//!   a connection.

pub mod miller;
pub mod potus;

use scraper::{ElementRef, Html, Selector};

/// Compile a selector known valid at build time.
pub(crate) fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Concatenated text of an element's subtree, as-is. Trimming and control
/// character cleanup are normalization concerns, not extraction concerns.
pub(crate) fn text_of(el: ElementRef) -> String {
    el.text().collect()
}

/// Find the text node exactly equal to `needle` and return its nearest
/// ancestor element named `ancestor`. Mirrors locating a label string and
/// walking up to the enclosing paragraph/section.
pub(crate) fn find_text_parent<'a>(
    doc: &'a Html,
    needle: &str,
    ancestor: &str,
) -> Option<ElementRef<'a>> {
    for node in doc.tree.root().descendants() {
        let Some(text) = node.value().as_text() else { continue };
        let text: &str = &text.text;
        if text != needle {
            continue;
        }
        for up in node.ancestors() {
            if let Some(el) = ElementRef::wrap(up) {
                if el.value().name() == ancestor {
                    return Some(el);
                }
            }
        }
    }
    None
}
