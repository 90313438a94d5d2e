//! Error types for analysis.

use thiserror::Error;

/// Errors that can occur while computing statistics.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A requested column is missing from the table.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A requested column does not hold numbers.
    #[error("column '{column}' is not numeric (dtype {dtype})")]
    NonNumericColumn { column: String, dtype: String },

    /// Too few usable rows for the requested computation.
    #[error("insufficient data: need at least {required} rows, found {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Options outside their valid range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for AnalysisError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
