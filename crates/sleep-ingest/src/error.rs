//! Error types for dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Dataset file does not exist.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty or has no data rows.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row is blank.
    #[error("no header row in {path}")]
    NoHeader { path: PathBuf },

    /// Header names the same column twice.
    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { column: String, path: PathBuf },

    /// A data row has a different number of fields than the header.
    #[error("line {line} of {path} has {found} fields, expected {expected}")]
    InconsistentRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::InconsistentRow {
            path: PathBuf::from("/data/sleep.csv"),
            line: 4,
            expected: 13,
            found: 12,
        };
        assert_eq!(
            err.to_string(),
            "line 4 of /data/sleep.csv has 12 fields, expected 13"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("Age".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
