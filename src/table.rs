// src/table.rs
//! In-memory tables handed between pipeline stages.
//!
//! `Table` is the wide per-president table (row index = canonical identifier,
//! one column per fact label plus the derived columns). `ElectionTable` is the
//! candidate × (year, metric) reshape of the raw election results. Both are
//! built once per run and handed off immutably to the next stage; there is no
//! persisted store and no update-in-place.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::Error;

/// A single typed cell. `Missing` is the explicit absence sentinel and is
/// never conflated with a parsed zero.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Missing,
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Plain-text rendering for export. Missing renders as the empty string.
    pub fn render(&self) -> String {
        match self {
            Value::Missing => s!(),
            Value::Text(t) => t.clone(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/* ---------------- Wide per-president table ---------------- */

#[derive(Clone, Debug)]
pub struct Table {
    columns: Vec<String>,
    index: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table { columns, index: Vec::new(), rows: Vec::new() }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn ids(&self) -> &[String] {
        &self.index
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn column_pos(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn row_pos(&self, id: &str) -> Option<usize> {
        self.index.iter().position(|i| i == id)
    }

    /// Append a row. The identifier must be new and the cell count must match
    /// the column count; both are structural invariants of the merge.
    pub fn push_row(&mut self, id: String, cells: Vec<Value>) -> Result<(), Error> {
        if self.row_pos(&id).is_some() {
            return Err(Error::Invariant(format!("duplicate row identifier {id:?}")));
        }
        if cells.len() != self.columns.len() {
            return Err(Error::Invariant(format!(
                "row {id:?} has {} cells, table has {} columns",
                cells.len(),
                self.columns.len()
            )));
        }
        self.index.push(id);
        self.rows.push(cells);
        Ok(())
    }

    pub fn get(&self, id: &str, column: &str) -> Option<&Value> {
        let r = self.row_pos(id)?;
        let c = self.column_pos(column)?;
        self.rows[r].get(c)
    }

    pub fn set(&mut self, id: &str, column: &str, value: Value) -> Result<(), Error> {
        let r = self
            .row_pos(id)
            .ok_or_else(|| Error::Invariant(format!("unknown row {id:?}")))?;
        let c = self
            .column_pos(column)
            .ok_or_else(|| Error::Invariant(format!("unknown column {column:?}")))?;
        self.rows[r][c] = value;
        Ok(())
    }

    /// Add a new all-Missing column (used by the derived-feature stage).
    pub fn add_column(&mut self, name: &str) -> Result<(), Error> {
        if self.column_pos(name).is_some() {
            return Err(Error::Invariant(format!("column {name:?} already exists")));
        }
        self.columns.push(s!(name));
        for row in &mut self.rows {
            row.push(Value::Missing);
        }
        Ok(())
    }

    /// Rewrite every cell of one column through `f`, aborting on the first
    /// cell that fails to coerce.
    pub fn map_column<F>(&mut self, column: &str, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&Value) -> Result<Value, Error>,
    {
        let c = self
            .column_pos(column)
            .ok_or_else(|| Error::Invariant(format!("unknown column {column:?}")))?;
        for row in &mut self.rows {
            row[c] = f(&row[c])?;
        }
        Ok(())
    }

    /// Stable sort of rows by a date column, missing dates last. The pipeline
    /// sorts once, after merge, before the derived-feature stage.
    pub fn sort_by_date(&mut self, column: &str) -> Result<(), Error> {
        let c = self
            .column_pos(column)
            .ok_or_else(|| Error::Invariant(format!("unknown column {column:?}")))?;
        let mut order: Vec<usize> = (0..self.index.len()).collect();
        order.sort_by_key(|&r| match self.rows[r][c] {
            Value::Date(d) => (0, d),
            _ => (1, NaiveDate::MAX),
        });
        self.index = order.iter().map(|&r| self.index[r].clone()).collect();
        self.rows = order.iter().map(|&r| self.rows[r].clone()).collect();
        Ok(())
    }
}

/* ---------------- Election results table ---------------- */

/// Vote counts for one candidate in one election year. Popular votes are
/// absent for elections held before they were tabulated.
#[derive(Clone, Debug, PartialEq)]
pub struct VoteCell {
    pub electoral: Value,
    pub popular: Value,
}

/// Candidate-indexed table with an (Electoral Votes, Popular Votes) pair of
/// sub-columns per election year.
#[derive(Clone, Debug, Default)]
pub struct ElectionTable {
    years: Vec<String>,
    candidates: Vec<String>,
    cells: BTreeMap<(String, String), VoteCell>,
}

impl ElectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn years(&self) -> &[String] {
        &self.years
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn insert(&mut self, candidate: &str, year: &str, cell: VoteCell) {
        if !self.years.iter().any(|y| y == year) {
            self.years.push(s!(year));
            self.years.sort();
        }
        if !self.candidates.iter().any(|c| c == candidate) {
            self.candidates.push(s!(candidate));
            self.candidates.sort();
        }
        self.cells.insert((s!(candidate), s!(year)), cell);
    }

    pub fn get(&self, candidate: &str, year: &str) -> Option<&VoteCell> {
        self.cells.get(&(s!(candidate), s!(year)))
    }

    pub fn electoral(&self, candidate: &str, year: &str) -> Option<&Value> {
        self.get(candidate, year).map(|c| &c.electoral)
    }

    /// Sum of parsed electoral votes across all candidates in one year.
    /// Missing cells contribute nothing.
    pub fn sum_electoral(&self, year: &str) -> i64 {
        self.candidates
            .iter()
            .filter_map(|c| self.electoral(c, year).and_then(Value::as_int))
            .sum()
    }

    /// Re-key one candidate onto a canonical identifier.
    pub fn rename_candidate(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        if let Some(pos) = self.candidates.iter().position(|c| c == from) {
            self.candidates[pos] = s!(to);
            self.candidates.sort();
        }
        let moved: Vec<(String, VoteCell)> = self
            .years
            .iter()
            .filter_map(|y| {
                self.cells
                    .remove(&(s!(from), y.clone()))
                    .map(|cell| (y.clone(), cell))
            })
            .collect();
        for (year, cell) in moved {
            self.cells.insert((s!(to), year), cell);
        }
    }

    /// Rewrite every cell through `f`, aborting on the first failure.
    pub fn map_cells<F>(&mut self, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&Value) -> Result<Value, Error>,
    {
        for cell in self.cells.values_mut() {
            cell.electoral = f(&cell.electoral)?;
            cell.popular = f(&cell.popular)?;
        }
        Ok(())
    }
}
