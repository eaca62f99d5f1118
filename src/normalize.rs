// src/normalize.rs
//! Type normalization: coerce every column of the merged tables to its
//! semantic type. Normalizing an already-normalized table is a no-op — typed
//! cells pass through every coercion unchanged.

use chrono::NaiveDate;

use crate::error::Error;
use crate::merge::{KEY_EVENTS_COUNT, SALARY};
use crate::table::{ElectionTable, Table, Value};

pub const TEXT_COLUMNS: &[&str] = &[
    "Birth Place",
    "Burial Place",
    "Career",
    "Children",
    "Description",
    "Education",
    "Famous Quote",
    "Full Name",
    "Marriage",
    "Nickname",
    "Political Party",
    "Religion",
];

pub const INT_COLUMNS: &[&str] = &[KEY_EVENTS_COUNT, "President Number"];

pub const DATE_COLUMNS: &[&str] =
    &["Birth Date", "Date Ended", "Death Date", "Inauguration Date"];

const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%B %d %Y", "%Y-%m-%d"];

/// Control characters and non-breaking spaces leak in from the markup.
const STRIP_CHARS: [char; 4] = ['\n', '\t', '\r', '\u{a0}'];

/// Stringified absence artifacts from upstream merges.
fn is_absent_token(text: &str) -> bool {
    matches!(text, "None" | "nan")
}

/* ---------------- President table ---------------- */

pub fn normalize_presidents(table: &mut Table) -> Result<(), Error> {
    // markup noise first, across every text cell
    for column in table.columns().to_vec() {
        table.map_column(&column, |v| Ok(strip_markup_noise(v)))?;
    }

    for &column in TEXT_COLUMNS {
        if table.column_pos(column).is_some() {
            table.map_column(column, coerce_text)?;
        }
    }
    for &column in INT_COLUMNS {
        if table.column_pos(column).is_some() {
            table.map_column(column, |v| coerce_int(column, v))?;
        }
    }
    if table.column_pos(SALARY).is_some() {
        table.map_column(SALARY, coerce_salary)?;
    }
    for &column in DATE_COLUMNS {
        if table.column_pos(column).is_some() {
            table.map_column(column, |v| coerce_date(column, v))?;
        }
    }
    Ok(())
}

/* ---------------- Election table ---------------- */

pub fn normalize_elections(table: &mut ElectionTable) -> Result<(), Error> {
    table.map_cells(coerce_votes)
}

/* ---------------- Cell coercions ---------------- */

fn strip_markup_noise(value: &Value) -> Value {
    match value {
        Value::Text(text) if text.contains(STRIP_CHARS) => {
            Value::Text(text.replace(STRIP_CHARS, ""))
        }
        other => other.clone(),
    }
}

fn coerce_text(value: &Value) -> Result<Value, Error> {
    Ok(match value {
        Value::Text(text) if is_absent_token(text) => Value::Missing,
        other => other.clone(),
    })
}

fn coerce_int(column: &str, value: &Value) -> Result<Value, Error> {
    match value {
        Value::Missing => Ok(Value::Missing),
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Text(text) => text
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| Error::parse(column, text)),
        other => Err(Error::parse(column, other.render())),
    }
}

fn coerce_salary(value: &Value) -> Result<Value, Error> {
    match value {
        Value::Missing => Ok(Value::Missing),
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Text(text) => parse_salary(text).map(Value::Int),
        other => Err(Error::parse(SALARY, other.render())),
    }
}

fn coerce_date(column: &str, value: &Value) -> Result<Value, Error> {
    match value {
        Value::Missing => Ok(Value::Missing),
        Value::Date(d) => Ok(Value::Date(*d)),
        Value::Text(text) => {
            let text = text.trim();
            if text.is_empty() || is_absent_token(text) {
                return Ok(Value::Missing);
            }
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
                .map(Value::Date)
                .ok_or_else(|| Error::parse(column, text))
        }
        other => Err(Error::parse(column, other.render())),
    }
}

/// Vote cells: plain integers, or grouped numerals. A literal absence token
/// parses to Missing, never 0.
pub fn coerce_votes(value: &Value) -> Result<Value, Error> {
    match value {
        Value::Missing => Ok(Value::Missing),
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Text(text) => {
            let text = text.trim();
            if text.is_empty() || is_absent_token(text) {
                return Ok(Value::Missing);
            }
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::Int(n));
            }
            parse_grouped_numeral(text)
                .map(Value::Int)
                .ok_or_else(|| Error::parse("Votes", text))
        }
        other => Err(Error::parse("Votes", other.render())),
    }
}

/* ---------------- Numeral parsing ---------------- */

/// Parse a digit-grouped numeral. The separator is ordinarily a comma; one
/// historical cell mixes a dot into the comma grouping, so when both are
/// present the dot is a further group divider, not a decimal point. A dot
/// without any comma *would* be a decimal point and is rejected.
fn parse_grouped_numeral(text: &str) -> Option<i64> {
    let has_dot = text.contains('.');
    if has_dot && !text.contains(',') {
        return None;
    }
    let mut value: i64 = 0;
    let mut groups = 0usize;
    for group in text.split([',', '.']) {
        if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        value = value * 1_000 + group.parse::<i64>().ok()?;
        groups += 1;
    }
    (groups > 1).then_some(value)
}

/// Parse a salary sentence of the form "…$<base>,000 … [expense … $<n>,000]".
/// The base is the first dollar amount; when an expense clause is present the
/// allowance is the *last* dollar amount, however many appear in between.
fn parse_salary(text: &str) -> Result<i64, Error> {
    let amounts = dollar_amounts(text);
    let base = *amounts.first().ok_or_else(|| Error::parse(SALARY, text))?;
    let allowance = if text.contains("expense") && amounts.len() > 1 {
        *amounts.last().unwrap()
    } else {
        0
    };
    Ok(base + allowance)
}

fn dollar_amounts(text: &str) -> Vec<i64> {
    let mut amounts = Vec::new();
    for (i, _) in text.match_indices('$') {
        let tail = &text[i + 1..];
        let end = tail
            .find(|c: char| !c.is_ascii_digit() && c != ',')
            .unwrap_or(tail.len());
        let numeral = tail[..end].trim_end_matches(',');
        if numeral.is_empty() {
            continue;
        }
        let parsed = numeral
            .parse::<i64>()
            .ok()
            .or_else(|| parse_grouped_numeral(numeral));
        if let Some(n) = parsed {
            amounts.push(n);
        }
    }
    amounts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_with_expense_clause_adds_last_amount() {
        let text = "Presidential Salary: $400,000 per year, plus a $50,000 expense account";
        assert_eq!(parse_salary(text).unwrap(), 450_000);
    }

    #[test]
    fn salary_without_expense_clause_has_no_allowance() {
        assert_eq!(
            parse_salary("Presidential Salary: $400,000 per year").unwrap(),
            400_000
        );
    }

    #[test]
    fn salary_expense_picks_last_amount_among_many() {
        let text = "salary of $200,000/year raised from $100,000, plus $50,000 expense allowance";
        assert_eq!(parse_salary(text).unwrap(), 250_000);
    }

    #[test]
    fn vote_parsing_cases() {
        let votes = |s: &str| coerce_votes(&Value::Text(s!(s))).unwrap();
        assert_eq!(votes("42"), Value::Int(42));
        assert_eq!(votes("1,234,567"), Value::Int(1_234_567));
        // the one historical dot/comma anomaly
        assert_eq!(votes("1.234,567"), Value::Int(1_234_567));
        assert_eq!(votes("65,915.795"), Value::Int(65_915_795));
        assert_eq!(votes("None"), Value::Missing);
        assert_eq!(votes(""), Value::Missing);
    }

    #[test]
    fn vote_parsing_rejects_plain_decimals_and_junk() {
        assert!(coerce_votes(&Value::Text(s!("1.5"))).is_err());
        assert!(coerce_votes(&Value::Text(s!("abc"))).is_err());
    }

    #[test]
    fn dates_parse_month_name_format() {
        let v = coerce_date("Birth Date", &Value::Text(s!("March 18, 1837"))).unwrap();
        assert_eq!(v, Value::Date(NaiveDate::from_ymd_opt(1837, 3, 18).unwrap()));
        assert!(coerce_date("Birth Date", &Value::Text(s!("not a date"))).is_err());
    }

    #[test]
    fn absence_tokens_become_missing_not_zero() {
        assert_eq!(coerce_text(&Value::Text(s!("None"))).unwrap(), Value::Missing);
        assert_eq!(coerce_text(&Value::Text(s!("nan"))).unwrap(), Value::Missing);
        assert_eq!(
            coerce_text(&Value::Text(s!("New York"))).unwrap(),
            Value::Text(s!("New York"))
        );
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        let mut t = Table::new(vec![
            s!("Birth Date"),
            s!("President Number"),
            s!(SALARY),
            s!("Religion"),
        ]);
        t.push_row(
            s!("Grover Cleveland"),
            vec![
                Value::Text(s!("\nMarch 18, 1837\n")),
                Value::Text(s!("22")),
                Value::Text(s!("Presidential Salary: $50,000/year")),
                Value::Text(s!("Presbyterian")),
            ],
        )
        .unwrap();

        normalize_presidents(&mut t).unwrap();
        assert_eq!(
            t.get("Grover Cleveland", "Birth Date"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(1837, 3, 18).unwrap()))
        );
        assert_eq!(t.get("Grover Cleveland", SALARY), Some(&Value::Int(50_000)));

        let once = t.clone();
        normalize_presidents(&mut t).unwrap();
        assert_eq!(t.get("Grover Cleveland", "Religion"), once.get("Grover Cleveland", "Religion"));
        assert_eq!(t.get("Grover Cleveland", SALARY), once.get("Grover Cleveland", SALARY));
        assert_eq!(t.get("Grover Cleveland", "Birth Date"), once.get("Grover Cleveland", "Birth Date"));
        assert_eq!(t.get("Grover Cleveland", "President Number"), once.get("Grover Cleveland", "President Number"));
    }
}
