//! Error types for chart rendering.

use std::path::PathBuf;

use sleep_analysis::AnalysisError;
use thiserror::Error;

/// Errors that can occur while preparing or writing a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A column named by the chart request is missing.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A column plotted on a numeric axis holds text.
    #[error("column '{column}' is not numeric (dtype {dtype})")]
    NonNumericColumn { column: String, dtype: String },

    /// Statistics feeding the chart could not be computed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// SVG serialization failed.
    #[error("failed to write SVG: {0}")]
    Svg(String),

    /// PNG rasterization failed.
    #[error("failed to render PNG: {0}")]
    Render(String),

    /// Failed to write the chart file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ChartError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;
