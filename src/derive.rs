// src/derive.rs
//! Derived columns, computed from the normalized, reconciled, merged tables —
//! never re-derived from raw source text. The president table must already be
//! sorted by inauguration date when these run.

use chrono::Datelike;

use crate::error::Error;
use crate::table::{ElectionTable, Table, Value};

pub const YEARS_AT_INAUGURATION: &str = "Years at Inauguration";
pub const ELECTORAL_VOTES_SHARE: &str = "Electoral Votes Share";
pub const NUMBER_OF_CHILDREN: &str = "Number of Children";

const INAUGURATION_DATE: &str = "Inauguration Date";
const BIRTH_DATE: &str = "Birth Date";
const CHILDREN: &str = "Children";

/// Age at inauguration in fractional 365-day years. Missing when either date
/// is missing.
pub fn add_years_at_inauguration(table: &mut Table) -> Result<(), Error> {
    table.add_column(YEARS_AT_INAUGURATION)?;
    for id in table.ids().to_vec() {
        let inauguration = table.get(&id, INAUGURATION_DATE).and_then(Value::as_date);
        let birth = table.get(&id, BIRTH_DATE).and_then(Value::as_date);
        if let (Some(inauguration), Some(birth)) = (inauguration, birth) {
            let days = (inauguration - birth).num_days();
            table.set(&id, YEARS_AT_INAUGURATION, Value::Float(days as f64 / 365.0))?;
        }
    }
    Ok(())
}

/// Share of electoral votes in the election that put this president in
/// office: the election year usually precedes the inauguration year by one,
/// so try year−1 first, then the year itself. No entry in either year means
/// the president took office by succession, not election — an expected
/// absence, kept as Missing.
pub fn add_electoral_votes_share(
    table: &mut Table,
    elections: &ElectionTable,
) -> Result<(), Error> {
    table.add_column(ELECTORAL_VOTES_SHARE)?;
    for id in table.ids().to_vec() {
        let Some(inauguration) = table.get(&id, INAUGURATION_DATE).and_then(Value::as_date)
        else {
            continue;
        };
        let year = inauguration.year();
        let candidates = [(year - 1).to_string(), year.to_string()];
        let hit = candidates.iter().find_map(|y| {
            let votes = elections.electoral(&id, y).and_then(Value::as_int)?;
            Some((votes, elections.sum_electoral(y)))
        });
        match hit {
            Some((votes, total)) if total > 0 => {
                table.set(&id, ELECTORAL_VOTES_SHARE, Value::Float(votes as f64 / total as f64))?;
            }
            _ => tracing::debug!(%id, year, "no election entry; took office by succession"),
        }
    }
    Ok(())
}

/// Number of comma/semicolon-delimited tokens in the children field; 0 when
/// the field is missing or empty.
pub fn add_number_of_children(table: &mut Table) -> Result<(), Error> {
    table.add_column(NUMBER_OF_CHILDREN)?;
    for id in table.ids().to_vec() {
        let count = match table.get(&id, CHILDREN).and_then(Value::as_str) {
            Some(children) => children
                .split([',', ';'])
                .filter(|token| !token.trim().is_empty())
                .count() as i64,
            None => 0,
        };
        table.set(&id, NUMBER_OF_CHILDREN, Value::Int(count))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::VoteCell;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn president_table(rows: Vec<(&str, Vec<Value>)>) -> Table {
        let mut t = Table::new(vec![
            s!(INAUGURATION_DATE),
            s!(BIRTH_DATE),
            s!(CHILDREN),
        ]);
        for (id, cells) in rows {
            t.push_row(s!(id), cells).unwrap();
        }
        t
    }

    #[test]
    fn years_at_inauguration_uses_365_day_years() {
        let mut t = president_table(vec![
            (
                "Grover Cleveland",
                vec![date(1885, 3, 4), date(1837, 3, 18), Value::Missing],
            ),
            ("No Birth", vec![date(1885, 3, 4), Value::Missing, Value::Missing]),
        ]);
        add_years_at_inauguration(&mut t).unwrap();

        let days = (NaiveDate::from_ymd_opt(1885, 3, 4).unwrap()
            - NaiveDate::from_ymd_opt(1837, 3, 18).unwrap())
        .num_days();
        assert_eq!(
            t.get("Grover Cleveland", YEARS_AT_INAUGURATION),
            Some(&Value::Float(days as f64 / 365.0))
        );
        assert_eq!(t.get("No Birth", YEARS_AT_INAUGURATION), Some(&Value::Missing));
    }

    #[test]
    fn vote_share_prefers_year_before_inauguration() {
        let mut e = ElectionTable::new();
        e.insert(
            "A",
            "1884",
            VoteCell { electoral: Value::Int(219), popular: Value::Missing },
        );
        e.insert(
            "B",
            "1884",
            VoteCell { electoral: Value::Int(182), popular: Value::Missing },
        );
        let mut t = president_table(vec![(
            "A",
            vec![date(1885, 3, 4), Value::Missing, Value::Missing],
        )]);
        add_electoral_votes_share(&mut t, &e).unwrap();
        assert_eq!(
            t.get("A", ELECTORAL_VOTES_SHARE),
            Some(&Value::Float(219.0 / 401.0))
        );
    }

    #[test]
    fn vote_share_falls_back_to_inauguration_year() {
        let mut e = ElectionTable::new();
        e.insert(
            "A",
            "1789",
            VoteCell { electoral: Value::Int(69), popular: Value::Missing },
        );
        let mut t = president_table(vec![(
            "A",
            vec![date(1789, 4, 30), Value::Missing, Value::Missing],
        )]);
        add_electoral_votes_share(&mut t, &e).unwrap();
        assert_eq!(t.get("A", ELECTORAL_VOTES_SHARE), Some(&Value::Float(1.0)));
    }

    #[test]
    fn vote_share_is_missing_for_succession() {
        let e = ElectionTable::new();
        let mut t = president_table(vec![(
            "Succeeded",
            vec![date(1841, 4, 4), Value::Missing, Value::Missing],
        )]);
        add_electoral_votes_share(&mut t, &e).unwrap();
        assert_eq!(t.get("Succeeded", ELECTORAL_VOTES_SHARE), Some(&Value::Missing));
    }

    #[test]
    fn child_count_handles_mixed_delimiters_and_absence() {
        let mut t = president_table(vec![
            (
                "Mixed",
                vec![Value::Missing, Value::Missing, Value::Text(s!("Anne; Susan, Martha"))],
            ),
            ("None", vec![Value::Missing, Value::Missing, Value::Missing]),
        ]);
        add_number_of_children(&mut t).unwrap();
        assert_eq!(t.get("Mixed", NUMBER_OF_CHILDREN), Some(&Value::Int(3)));
        assert_eq!(t.get("None", NUMBER_OF_CHILDREN), Some(&Value::Int(0)));
    }
}
