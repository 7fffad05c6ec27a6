//! Error type for loading parameters and assumption tables
//!
//! The projection itself never fails; only reading inputs from disk does.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid assumption table {table}: {reason}")]
    InvalidTable { table: String, reason: String },
}

impl ProjectionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProjectionError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_table(table: &str, reason: impl Into<String>) -> Self {
        ProjectionError::InvalidTable {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
