// src/export.rs
// CSV/TSV writing for the two output tables. Minimal writer (quotes + CRLF
// tolerant), no external format machinery.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::table::{ElectionTable, Table};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delim {
    Csv,
    Tsv,
}

impl Delim {
    fn sep(self) -> char {
        match self {
            Delim::Csv => ',',
            Delim::Tsv => '\t',
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Delim::Csv => "csv",
            Delim::Tsv => "tsv",
        }
    }
}

fn escape(field: &str, sep: char) -> String {
    if field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        s!(field)
    }
}

pub fn write_row<W: Write>(w: &mut W, fields: &[String], delim: Delim) -> io::Result<()> {
    let sep = delim.sep();
    let line = fields
        .iter()
        .map(|f| escape(f, sep))
        .collect::<Vec<_>>()
        .join(&sep.to_string());
    writeln!(w, "{line}")
}

/// Write the president table, one row per term of office, identifier first.
pub fn export_presidents(path: &Path, table: &Table, delim: Delim) -> io::Result<()> {
    let mut w = BufWriter::new(fs::File::create(path)?);

    let mut header = vec![s!("President")];
    header.extend(table.columns().iter().cloned());
    write_row(&mut w, &header, delim)?;

    for id in table.ids() {
        let mut row = vec![id.clone()];
        for column in table.columns() {
            row.push(table.get(id, column).map(|v| v.render()).unwrap_or_default());
        }
        write_row(&mut w, &row, delim)?;
    }
    w.flush()
}

/// Write the election table: one row per candidate, an (Electoral Votes,
/// Popular Votes) column pair per election year. Years a candidate did not
/// run in are left empty.
pub fn export_elections(path: &Path, table: &ElectionTable, delim: Delim) -> io::Result<()> {
    let mut w = BufWriter::new(fs::File::create(path)?);

    let mut header = vec![s!("Candidate")];
    for year in table.years() {
        header.push(format!("{year} Electoral Votes"));
        header.push(format!("{year} Popular Votes"));
    }
    write_row(&mut w, &header, delim)?;

    for candidate in table.candidates() {
        let mut row = vec![candidate.clone()];
        for year in table.years() {
            match table.get(candidate, year) {
                Some(cell) => {
                    row.push(cell.electoral.render());
                    row.push(cell.popular.render());
                }
                None => {
                    row.push(s!());
                    row.push(s!());
                }
            }
        }
        write_row(&mut w, &row, delim)?;
    }
    w.flush()
}
