// src/reconcile.rs
//! Entity reconciliation between the two sources.
//!
//! The two sites enumerate the same presidents in the same chronological
//! order but spell the names differently. Pairing is positional, guarded by a
//! surname check on every pair: a single mismatch means the listings have
//! drifted out of lockstep and must not be silently merged.

use crate::error::Error;
use crate::table::ElectionTable;

/// Last whitespace-separated token of a full name.
pub fn surname(name: &str) -> &str {
    name.split_whitespace().last().unwrap_or(name)
}

fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

/// Verify that two equally-long, equally-ordered identifier listings denote
/// the same presidents pair by pair.
pub fn pair_identifiers(reference: &[String], raw: &[String]) -> Result<(), Error> {
    if reference.len() != raw.len() {
        return Err(Error::Reconciliation(format!(
            "source listings disagree on president count: {} vs {}",
            reference.len(),
            raw.len()
        )));
    }
    for (reference, raw) in reference.iter().zip(raw) {
        if !surname(reference).eq_ignore_ascii_case(surname(raw)) {
            return Err(Error::Reconciliation(format!(
                "surname mismatch pairing {reference:?} with {raw:?}"
            )));
        }
    }
    Ok(())
}

/// Re-key election-table candidates that are presidents onto the canonical
/// identifiers, matching on first name + surname. Candidates who never held
/// office keep their original spelling. A term-disambiguated identifier
/// ("<name> 2") never matches — the election rows stay under the first-term
/// identifier, which is where the vote-share lookup finds them.
pub fn relabel_candidates(elections: &mut ElectionTable, identifiers: &[String]) {
    for id in identifiers {
        let (first, last) = (first_name(id), surname(id));
        let matches: Vec<String> = elections
            .candidates()
            .iter()
            .filter(|c| {
                c.as_str() != id
                    && first_name(c).eq_ignore_ascii_case(first)
                    && surname(c).eq_ignore_ascii_case(last)
            })
            .cloned()
            .collect();
        for candidate in matches {
            tracing::debug!(%candidate, %id, "relabeling election candidate");
            elections.rename_candidate(&candidate, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Value, VoteCell};

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| s!(*n)).collect()
    }

    #[test]
    fn pairing_accepts_spelling_differences_with_same_surname() {
        let miller = ids(&["Martin Van Buren", "James K. Polk"]);
        let potus = ids(&["Martin van Buren", "James Polk"]);
        assert!(pair_identifiers(&miller, &potus).is_ok());
    }

    #[test]
    fn pairing_fails_loudly_on_surname_mismatch() {
        let miller = ids(&["John Adams", "Thomas Jefferson"]);
        let potus = ids(&["John Adams", "Aaron Burr"]);
        let err = pair_identifiers(&miller, &potus).unwrap_err();
        assert!(matches!(err, Error::Reconciliation(_)));
    }

    #[test]
    fn pairing_fails_on_count_drift() {
        let err = pair_identifiers(&ids(&["John Adams"]), &ids(&[])).unwrap_err();
        assert!(matches!(err, Error::Reconciliation(_)));
    }

    #[test]
    fn relabel_matches_first_name_and_surname() {
        let mut e = ElectionTable::new();
        e.insert(
            "Ulysses Grant",
            "1868",
            VoteCell { electoral: Value::Int(214), popular: Value::Missing },
        );
        relabel_candidates(&mut e, &ids(&["Ulysses S. Grant"]));
        assert!(e.electoral("Ulysses S. Grant", "1868").is_some());
        assert!(e.electoral("Ulysses Grant", "1868").is_none());
    }

    #[test]
    fn disambiguated_second_term_never_steals_rows() {
        let mut e = ElectionTable::new();
        e.insert(
            "Grover Cleveland",
            "1892",
            VoteCell { electoral: Value::Int(277), popular: Value::Missing },
        );
        relabel_candidates(&mut e, &ids(&["Grover Cleveland", "Grover Cleveland 2"]));
        assert!(e.electoral("Grover Cleveland", "1892").is_some());
        assert!(e.electoral("Grover Cleveland 2", "1892").is_none());
    }
}
