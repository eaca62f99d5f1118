// src/lib.rs
//! Two-source scraping and reconciliation pipeline for US presidential data.
//!
//! One source contributes biographical fact sheets, the other salaries and
//! election results; the pipeline reconciles their identifiers, merges them
//! into typed tables, derives a few analytical columns and exports CSV/TSV.

#[macro_use]
pub mod macros;

pub mod cli;
pub mod derive;
pub mod error;
pub mod export;
pub mod fetch;
pub mod geocode;
pub mod merge;
pub mod normalize;
pub mod progress;
pub mod quirks;
pub mod reconcile;
pub mod runner;
pub mod scrape;
pub mod specs;
pub mod table;
