// src/merge.rs
//! Join the per-source record families into the two output tables.
//!
//! The wide president table takes its rows from the biographical source's
//! reconciled identifiers; the salary source contributes columns only, never
//! rows. The nested election results are reshaped independently into a
//! candidate × (year, metric) table.

use crate::error::Error;
use crate::scrape::{MillerScrape, PotusScrape};
use crate::table::{ElectionTable, Table, Value, VoteCell};

pub const DESCRIPTION: &str = "Description";
pub const FAMOUS_QUOTE: &str = "Famous Quote";
pub const KEY_EVENTS_COUNT: &str = "Key Events Count";
pub const SALARY: &str = "Salary";

/// One row per reconciled identifier, one column per fact-sheet label plus
/// the scalar record families. Every identifier must have all four Source-A
/// families and a salary; a hole here means a correction was not authored for
/// a split identifier, and merging around it would misattribute data.
pub fn merged_entity_table(
    miller: &MillerScrape,
    potus: &PotusScrape,
) -> Result<Table, Error> {
    let mut columns: Vec<String> = Vec::new();
    for id in &miller.order {
        let facts = miller
            .fast_facts
            .get(id)
            .ok_or_else(|| Error::Reconciliation(format!("no fact sheet for {id:?}")))?;
        for (label, _) in facts {
            if !columns.contains(label) {
                columns.push(label.clone());
            }
        }
    }
    for extra in [DESCRIPTION, FAMOUS_QUOTE, KEY_EVENTS_COUNT, SALARY] {
        columns.push(s!(extra));
    }

    let mut table = Table::new(columns.clone());
    for id in &miller.order {
        let facts = &miller.fast_facts[id];
        let missing =
            |what: &str| Error::Reconciliation(format!("no {what} recorded for {id:?}"));

        let mut cells = Vec::with_capacity(columns.len());
        for column in &columns {
            let cell = match column.as_str() {
                DESCRIPTION => Value::Text(
                    miller.descriptions.get(id).cloned().ok_or_else(|| missing("description"))?,
                ),
                FAMOUS_QUOTE => Value::Text(
                    miller.quotes.get(id).cloned().ok_or_else(|| missing("quote"))?,
                ),
                KEY_EVENTS_COUNT => Value::Int(
                    *miller.key_event_counts.get(id).ok_or_else(|| missing("event count"))?,
                ),
                SALARY => Value::Text(
                    potus.salaries.get(id).cloned().ok_or_else(|| missing("salary"))?,
                ),
                label => facts
                    .iter()
                    .find(|(l, _)| l == label)
                    .map(|(_, v)| Value::Text(v.clone()))
                    .unwrap_or(Value::Missing),
            };
            cells.push(cell);
        }
        table.push_row(id.clone(), cells)?;
    }
    Ok(table)
}

/// Reshape year → candidate → raw votes into the candidate-indexed election
/// table. Cells stay raw text here; the normalizer types them.
pub fn election_table(potus: &PotusScrape) -> ElectionTable {
    let mut table = ElectionTable::new();
    for (year, by_candidate) in &potus.election_results {
        for (candidate, votes) in by_candidate {
            let raw = |field: &Option<String>| match field {
                Some(text) => Value::Text(text.clone()),
                None => Value::Missing,
            };
            table.insert(
                candidate,
                year,
                VoteCell { electoral: raw(&votes.electoral), popular: raw(&votes.popular) },
            );
        }
    }
    table
}
