// src/error.rs
use thiserror::Error;

/// Failure taxonomy for the whole pipeline.
///
/// Nothing here is retried. Correctness of historical data takes priority over
/// availability: the only absences absorbed locally are the ones documented as
/// expected (missing key-events body, missing election-year match), everything
/// else surfaces to the run's caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport or non-success status while retrieving a document.
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Expected navigation/listing structure absent. Fatal for the run, since
    /// no entities can be enumerated.
    #[error("discovery failed: {0}")]
    Discovery(String),

    /// Expected field/panel absent on an otherwise-fetched page.
    #[error("extraction failed for {entity}: {what}")]
    Extraction { entity: String, what: String },

    /// Identifier pairing between the two sources failed a sanity check.
    /// Merging without this guarantee could silently attribute one president's
    /// data to another, so this is fatal.
    #[error("reconciliation failed: {0}")]
    Reconciliation(String),

    /// A raw value could not be coerced to its column's declared type.
    #[error("parse failed for column {column:?}: {value:?}")]
    Parse { column: String, value: String },

    /// A correction routine precondition failed (e.g. applied twice against
    /// the same identifier). Fatal, prevents silent data duplication.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl Error {
    pub fn extraction(entity: impl Into<String>, what: impl Into<String>) -> Self {
        Error::Extraction { entity: entity.into(), what: what.into() }
    }

    pub fn parse(column: impl Into<String>, value: impl Into<String>) -> Self {
        Error::Parse { column: column.into(), value: value.into() }
    }
}
