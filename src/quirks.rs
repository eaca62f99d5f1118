// src/quirks.rs
//! Hand-identified source anomalies, kept in one auditable table instead of
//! conditionals scattered through the extraction path.
//!
//! Which presidents need which correction is domain knowledge; it cannot be
//! discovered from the documents themselves. If a second non-consecutive-term
//! president ever exists, add a row here — the correction routines are keyed
//! off this table, not off a hardcoded name.

/// One known anomaly on one of the two sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quirk {
    /// Served two non-consecutive terms; the fact sheet carries doubled
    /// values for the term-boundary labels and must be split into two rows.
    NonConsecutiveTerms,
    /// The salary label on the POTUS page carries trailing whitespace.
    SalaryLabelTrailingSpace,
    /// No key-events article body was ever published; the event count is a
    /// genuine 0, not an extraction failure.
    NoKeyEventsBody,
}

pub const QUIRKS: &[(&str, Quirk)] = &[
    ("Grover Cleveland", Quirk::NonConsecutiveTerms),
    ("Benjamin Harrison", Quirk::SalaryLabelTrailingSpace),
    ("Donald Trump", Quirk::NoKeyEventsBody),
];

/// Birth places the geocoder cannot resolve as written; looked up before the
/// generic "(now …)" / "near …" adjustments.
pub const PLACE_RENAMES: &[(&str, &str)] = &[
    ("Shadwell plantation", "Shadwell, Virginia"),
    ("Waxhaw area", "Waxhaw, North Carolina"),
];

pub fn has_quirk(entity: &str, quirk: Quirk) -> bool {
    QUIRKS.iter().any(|&(name, q)| name == entity && q == quirk)
}

/// All presidents flagged with a given quirk, in table order.
pub fn entities_with(quirk: Quirk) -> impl Iterator<Item = &'static str> {
    QUIRKS
        .iter()
        .filter(move |&&(_, q)| q == quirk)
        .map(|&(name, _)| name)
}

/// Label variants to try when locating the salary paragraph. The canonical
/// label always comes first so the general path stays branch-free.
pub fn salary_labels(entity: &str) -> Vec<&'static str> {
    let mut labels = vec!["Presidential Salary:"];
    if has_quirk(entity, Quirk::SalaryLabelTrailingSpace) {
        labels.push("Presidential Salary: ");
    }
    labels
}
