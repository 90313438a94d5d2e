//! Error types for the data model.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building model values or loading configuration.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::AppConfig`].
    #[error("invalid config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A serialized category map does not use the codes `0..n`.
    #[error("invalid category map: {0}")]
    InvalidCategoryMap(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
