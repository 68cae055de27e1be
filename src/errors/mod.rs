use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// A report date that is not a zero-padded `YYYY-MM-DD` calendar day
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid date '{0}', expected YYYY-MM-DD")]
pub struct InvalidDate(pub String);

/// Failures of the file-backed report store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read reports file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Reports file {path} does not hold a report collection")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize reports")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to write reports file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Report for {0} not found")]
    NotFound(NaiveDate),

    #[error("A report for {0} already exists")]
    DateConflict(NaiveDate),
}

impl StoreError {
    /// Read/parse failures: the collection could not be loaded at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Read { .. } | StoreError::Parse { .. })
    }
}
