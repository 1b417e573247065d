//! Loading-boundary error model.

use marketlens_core::InsightError;
use thiserror::Error;

/// Failure while loading an input table.
///
/// `MissingColumn` is kept as its own variant so callers can show a precise
/// schema diagnostic instead of a generic parse failure.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A required column was absent from the table header.
    #[error("table `{table}` is missing required column `{column}`")]
    MissingColumn { table: String, column: String },

    /// The table file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A row failed to parse against the table schema.
    #[error("failed to parse `{table}`: {source}")]
    Parse {
        table: String,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}

impl From<LoadError> for InsightError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::MissingColumn { table, column } => {
                InsightError::MissingColumn { table, column }
            }
            other => InsightError::validation(other.to_string()),
        }
    }
}
