//! Domain error model.

use thiserror::Error;

/// Result type used across the derivation layer.
pub type InsightResult<T> = Result<T, InsightError>;

/// Derivation-level error.
///
/// Keep this focused on deterministic derivation failures (schema gaps,
/// empty inputs, validation). I/O concerns belong to the loading boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InsightError {
    /// A required column was absent from an input table.
    #[error("table `{table}` is missing required column `{column}`")]
    MissingColumn { table: String, column: String },

    /// An aggregation step required a non-empty table and got an empty one.
    #[error("table `{table}` is empty")]
    EmptyTable { table: String },

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl InsightError {
    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn empty_table(table: impl Into<String>) -> Self {
        Self::EmptyTable {
            table: table.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
