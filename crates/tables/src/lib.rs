//! `marketlens-tables`
//!
//! **Responsibility:** the tabular loading boundary.
//!
//! This crate owns the typed row schemas for the seven input tables and the
//! CSV loading path that enforces them. Loading fails fast when a required
//! column is absent; it never coerces a partial schema into defaults. The
//! derivation crates downstream only ever see already-typed slices.

pub mod error;
pub mod loader;
pub mod records;

pub use error::LoadError;
pub use loader::Dataset;
pub use records::{
    ForecastRecord, PricingRecord, PricingScenarioRecord, ProductionRecord, SalesRecord,
    SegmentRecord, SegmentSummaryRecord,
};
