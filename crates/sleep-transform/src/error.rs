//! Error types for preprocessing.

use std::fmt;

use sleep_ingest::IngestError;
use thiserror::Error;

/// Errors raised by a single transformation stage.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A required column is missing from the table.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A compound value could not be split into its typed parts.
    #[error("malformed value '{value}' in column '{column}' at row {row}: {reason}")]
    MalformedCompoundValue {
        column: String,
        /// 0-based row index.
        row: usize,
        value: String,
        reason: String,
    },

    /// A derived column would overwrite an existing one.
    #[error("column '{column}' already exists")]
    DuplicateColumn { column: String },

    /// The split definition itself is unusable.
    #[error("invalid split of column '{column}': {message}")]
    InvalidSplit { column: String, message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation stages.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Pipeline stage names, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Normalize,
    Encode,
    Split,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Normalize => "normalize",
            Stage::Encode => "encode",
            Stage::Split => "split",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A preprocessing run that stopped at one stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The dataset could not be loaded.
    #[error("load stage failed: {0}")]
    Load(#[from] IngestError),

    /// A transformation stage rejected the table.
    #[error("{stage} stage failed: {source}")]
    Transform {
        stage: Stage,
        #[source]
        source: TransformError,
    },
}

impl PipelineError {
    pub(crate) fn at(stage: Stage) -> impl FnOnce(TransformError) -> Self {
        move |source| Self::Transform { stage, source }
    }

    /// Stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Load(_) => Stage::Load,
            PipelineError::Transform { stage, .. } => *stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_value_display() {
        let err = TransformError::MalformedCompoundValue {
            column: "Blood Pressure".to_string(),
            row: 3,
            value: "120".to_string(),
            reason: "expected 2 parts separated by '/', found 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed value '120' in column 'Blood Pressure' at row 3: \
             expected 2 parts separated by '/', found 1"
        );
    }

    #[test]
    fn test_pipeline_error_names_stage() {
        let err = PipelineError::at(Stage::Split)(TransformError::ColumnNotFound {
            column: "Blood Pressure".to_string(),
        });
        assert_eq!(err.stage(), Stage::Split);
        assert_eq!(
            err.to_string(),
            "split stage failed: column 'Blood Pressure' not found"
        );
    }
}
