// src/scrape/miller.rs
//! Biographical source scraper. Collects four record families per president:
//! fast facts, description, famous quote, key-event count.

use std::collections::HashMap;

use scraper::Html;

use crate::error::Error;
use crate::fetch::{Fetcher, MILLER_ORIGIN};
use crate::progress::Progress;
use crate::specs::miller as spec;

/// The fast-fact labels that carry doubled values for a president with two
/// non-consecutive terms. Everything else on the sheet is per-person, not
/// per-term, and is duplicated verbatim by the correction.
const DOUBLED_LABELS: [&str; 3] = ["Inauguration Date", "Date Ended", "President Number"];

/// Suffix for the second-term identifier of a split president.
const SECOND_TERM_SUFFIX: &str = " 2";

pub struct MillerScrape<'f> {
    fetcher: &'f dyn Fetcher,
    /// Ordered president → subdirectory mapping from discovery.
    pub subdirectories: Vec<(String, String)>,
    /// Row order for the merge: discovery order plus split identifiers
    /// appended by the two-term correction.
    pub order: Vec<String>,
    pub fast_facts: HashMap<String, Vec<(String, String)>>,
    pub descriptions: HashMap<String, String>,
    pub quotes: HashMap<String, String>,
    pub key_event_counts: HashMap<String, i64>,
}

impl<'f> MillerScrape<'f> {
    pub fn new(fetcher: &'f dyn Fetcher) -> Self {
        MillerScrape {
            fetcher,
            subdirectories: Vec::new(),
            order: Vec::new(),
            fast_facts: HashMap::new(),
            descriptions: HashMap::new(),
            quotes: HashMap::new(),
            key_event_counts: HashMap::new(),
        }
    }

    /// Parse the origin's navigation into the ordered president list.
    pub fn discover_entities(&mut self) -> Result<(), Error> {
        let doc = self.fetcher.fetch(MILLER_ORIGIN, "")?;
        self.subdirectories = spec::subdirectories(&doc)?;
        self.order = self.subdirectories.iter().map(|(n, _)| n.clone()).collect();
        tracing::info!(count = self.order.len(), "discovered presidents (biographical source)");
        Ok(())
    }

    fn page(&self, entity: &str) -> Result<(String, Html), Error> {
        let path = self
            .subdirectories
            .iter()
            .find(|(n, _)| n == entity)
            .map(|(_, p)| p.clone())
            .ok_or_else(|| Error::extraction(entity, "not in discovered president list"))?;
        let doc = self.fetcher.fetch(MILLER_ORIGIN, &path)?;
        Ok((path, doc))
    }

    pub fn extract_fact_sheet(&mut self, entity: &str) -> Result<(), Error> {
        let (_, doc) = self.page(entity)?;
        let facts = spec::fact_sheet(&doc, entity)?;
        self.fast_facts.insert(s!(entity), facts);
        Ok(())
    }

    pub fn extract_description(&mut self, entity: &str) -> Result<(), Error> {
        let (_, doc) = self.page(entity)?;
        let text = spec::description(&doc, entity)?;
        self.descriptions.insert(s!(entity), text);
        Ok(())
    }

    pub fn extract_quote(&mut self, entity: &str) -> Result<(), Error> {
        let (_, doc) = self.page(entity)?;
        let text = spec::quote(&doc, entity)?;
        self.quotes.insert(s!(entity), text);
        Ok(())
    }

    /// Count of notable events from the `/key-events` subpage. An absent
    /// article body is a known data gap and counts 0.
    pub fn extract_event_count(&mut self, entity: &str) -> Result<(), Error> {
        let (path, _) = self.page(entity)?;
        let doc = self
            .fetcher
            .fetch(MILLER_ORIGIN, &format!("{}/key-events", path.trim_end_matches('/')))?;
        self.key_event_counts.insert(s!(entity), spec::key_event_count(&doc));
        Ok(())
    }

    /// Run all four extractions for every discovered president.
    pub fn collect_all(&mut self, progress: &mut dyn Progress) -> Result<(), Error> {
        let names: Vec<String> = self.order.clone();
        progress.begin(names.len());
        for name in &names {
            self.extract_fact_sheet(name)?;
            self.extract_description(name)?;
            self.extract_quote(name)?;
            self.extract_event_count(name)?;
            progress.item_done(name);
        }
        progress.finish();
        Ok(())
    }

    /// Split a two-non-consecutive-term president into two logical terms.
    ///
    /// The three term-boundary labels carry doubled, newline-separated values;
    /// the first goes to the original identifier, the second to a new
    /// disambiguated one. Description, quote and event count are duplicated
    /// verbatim. Guarded against double application.
    pub fn apply_two_term_correction(&mut self, entity: &str) -> Result<(), Error> {
        let alias = format!("{entity}{SECOND_TERM_SUFFIX}");
        if self.fast_facts.contains_key(&alias) {
            return Err(Error::Invariant(format!(
                "two-term correction already applied to {entity:?}"
            )));
        }
        let facts = self
            .fast_facts
            .get(entity)
            .cloned()
            .ok_or_else(|| Error::Invariant(format!("no fact sheet for {entity:?}")))?;

        let mut first_term = facts.clone();
        let mut second_term = facts;
        for label in DOUBLED_LABELS {
            let (first, second) = split_doubled_value(&first_term, entity, label)?;
            set_fact(&mut first_term, label, first);
            set_fact(&mut second_term, label, second);
        }

        self.fast_facts.insert(s!(entity), first_term);
        self.fast_facts.insert(alias.clone(), second_term);
        for map in [&mut self.descriptions, &mut self.quotes] {
            if let Some(v) = map.get(entity).cloned() {
                map.insert(alias.clone(), v);
            }
        }
        if let Some(count) = self.key_event_counts.get(entity).copied() {
            self.key_event_counts.insert(alias.clone(), count);
        }
        self.order.push(alias);
        Ok(())
    }
}

/// Split a doubled fact value on its internal line breaks: the non-empty
/// lines are (first term, second term).
fn split_doubled_value(
    facts: &[(String, String)],
    entity: &str,
    label: &str,
) -> Result<(String, String), Error> {
    let raw = facts
        .iter()
        .find(|(l, _)| l == label)
        .map(|(_, v)| v.as_str())
        .ok_or_else(|| Error::Invariant(format!("{entity:?} has no {label:?} fact")))?;
    let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());
    match (lines.next(), lines.next()) {
        (Some(first), Some(second)) => Ok((s!(first), s!(second))),
        _ => Err(Error::Invariant(format!(
            "{entity:?} fact {label:?} is not doubled: {raw:?}"
        ))),
    }
}

fn set_fact(facts: &mut [(String, String)], label: &str, value: String) {
    if let Some(slot) = facts.iter_mut().find(|(l, _)| l == label) {
        slot.1 = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FixtureFetcher;

    fn fact(scrape: &MillerScrape, entity: &str, label: &str) -> String {
        scrape.fast_facts[entity]
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.clone())
            .unwrap()
    }

    fn cleveland_scrape(fetcher: &FixtureFetcher) -> MillerScrape<'_> {
        let mut m = MillerScrape::new(fetcher);
        m.subdirectories = vec![(s!("Grover Cleveland"), s!("/president/cleveland"))];
        m.order = vec![s!("Grover Cleveland")];
        m.fast_facts.insert(
            s!("Grover Cleveland"),
            vec![
                (s!("Birth Date"), s!("\nMarch 18, 1837\n")),
                (s!("Inauguration Date"), s!("\nMarch 4, 1885\n\nMarch 4, 1893\n")),
                (s!("Date Ended"), s!("\nMarch 4, 1889\n\nMarch 4, 1897\n")),
                (s!("President Number"), s!("\n22\n24\n")),
            ],
        );
        m.descriptions.insert(s!("Grover Cleveland"), s!("desc"));
        m.quotes.insert(s!("Grover Cleveland"), s!("quote"));
        m.key_event_counts.insert(s!("Grover Cleveland"), 7);
        m
    }

    #[test]
    fn two_term_correction_splits_and_duplicates() {
        let fetcher = FixtureFetcher::new();
        let mut m = cleveland_scrape(&fetcher);
        m.apply_two_term_correction("Grover Cleveland").unwrap();

        assert_eq!(fact(&m, "Grover Cleveland", "Inauguration Date"), "March 4, 1885");
        assert_eq!(fact(&m, "Grover Cleveland 2", "Inauguration Date"), "March 4, 1893");
        assert_eq!(fact(&m, "Grover Cleveland", "President Number"), "22");
        assert_eq!(fact(&m, "Grover Cleveland 2", "President Number"), "24");
        // per-person facts carried over unchanged
        assert_eq!(fact(&m, "Grover Cleveland 2", "Birth Date"), "\nMarch 18, 1837\n");
        assert_eq!(m.descriptions["Grover Cleveland 2"], "desc");
        assert_eq!(m.quotes["Grover Cleveland 2"], "quote");
        assert_eq!(m.key_event_counts["Grover Cleveland 2"], 7);
        // exactly one new identifier, appended to the order
        assert_eq!(m.order, ["Grover Cleveland", "Grover Cleveland 2"]);
    }

    #[test]
    fn two_term_correction_refuses_double_application() {
        let fetcher = FixtureFetcher::new();
        let mut m = cleveland_scrape(&fetcher);
        m.apply_two_term_correction("Grover Cleveland").unwrap();
        let err = m.apply_two_term_correction("Grover Cleveland").unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
        assert_eq!(m.order.len(), 2);
    }

    #[test]
    fn correction_requires_doubled_values() {
        let fetcher = FixtureFetcher::new();
        let mut m = cleveland_scrape(&fetcher);
        m.fast_facts.get_mut("Grover Cleveland").unwrap()[1] =
            (s!("Inauguration Date"), s!("\nMarch 4, 1885\n"));
        let err = m.apply_two_term_correction("Grover Cleveland").unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }
}
