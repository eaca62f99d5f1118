// src/runner.rs
//! Top-level pipeline: fetch → scrape both sources → reconcile → merge →
//! normalize → sort → derive. Built once per run from freshly fetched
//! documents; the recovery path for any failure is a full re-run.

use crate::derive;
use crate::error::Error;
use crate::fetch::Fetcher;
use crate::merge;
use crate::normalize;
use crate::progress::Progress;
use crate::quirks::{self, Quirk};
use crate::reconcile;
use crate::scrape::{MillerScrape, PotusScrape};
use crate::table::{ElectionTable, Table};

const INAUGURATION_DATE: &str = "Inauguration Date";

pub struct PipelineOutput {
    pub presidents: Table,
    pub elections: ElectionTable,
}

pub fn run(fetcher: &dyn Fetcher, progress: &mut dyn Progress) -> Result<PipelineOutput, Error> {
    // Source A: biographical pages.
    let mut miller = MillerScrape::new(fetcher);
    miller.discover_entities()?;
    progress.log("Collecting biographical pages…");
    miller.collect_all(progress)?;
    for name in quirks::entities_with(Quirk::NonConsecutiveTerms) {
        miller.apply_two_term_correction(name)?;
    }

    // Source B: salary/election pages, renamed onto Source A's identifiers
    // before anything is extracted per-president.
    let mut potus = PotusScrape::new(fetcher);
    potus.discover_entities()?;
    let reference: Vec<String> =
        miller.subdirectories.iter().map(|(name, _)| name.clone()).collect();
    potus.reconcile_identifiers(&reference)?;
    progress.log("Collecting salary/election pages…");
    potus.collect_all(progress)?;
    for name in quirks::entities_with(Quirk::NonConsecutiveTerms) {
        potus.duplicate_two_term_salary(name)?;
    }

    // Merge, type, order, derive.
    let mut presidents = merge::merged_entity_table(&miller, &potus)?;
    let mut elections = merge::election_table(&potus);

    normalize::normalize_presidents(&mut presidents)?;
    normalize::normalize_elections(&mut elections)?;

    presidents.sort_by_date(INAUGURATION_DATE)?;
    let ids: Vec<String> = presidents.ids().to_vec();
    reconcile::relabel_candidates(&mut elections, &ids);

    derive::add_years_at_inauguration(&mut presidents)?;
    derive::add_electoral_votes_share(&mut presidents, &elections)?;
    derive::add_number_of_children(&mut presidents)?;

    tracing::info!(
        rows = presidents.n_rows(),
        years = elections.years().len(),
        "pipeline complete"
    );
    Ok(PipelineOutput { presidents, elections })
}
