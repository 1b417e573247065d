//! `marketlens-insight`
//!
//! **Responsibility:** deterministic derivation jobs over loaded tables.
//!
//! - It consumes already-typed rows from `marketlens-tables`.
//! - It never performs I/O and never mutates its inputs.
//! - Every derivation is a pure function: identical inputs, identical
//!   outputs, safe to recompute at will.

pub mod context;
pub mod projection;
pub mod trend;

pub use context::BusinessContext;
pub use projection::{ProjectionPoint, ProjectionSeries, project};
pub use trend::{TimePoint, bucket_series, classify, product_trends};
