//! Dataset ingestion for the sleep-health workspace.
//!
//! Loads a comma-separated file into a Polars `DataFrame`, inferring one
//! type per column: integer, float, or text.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sleep_ingest::load_dataset;
//!
//! let df = load_dataset(Path::new("data/Sleep_health_and_lifestyle_dataset.csv"))?;
//! println!("{} rows", df.height());
//! ```

mod dataset;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use dataset::{
    ColumnKind, MAX_COLUMNS_WARNING, infer_column, infer_kind, load_dataset, validate_table_shape,
};
