//! Sleep-health data model.
//!
//! Types shared by every stage of the workspace:
//!
//! - **category**: label-to-code maps produced by categorical encoding
//! - **labels**: code-to-display-label tables used only for chart legends
//! - **columns**: names of the dataset columns the pipeline refers to
//! - **config**: pipeline, regression and chart configuration (TOML)

pub mod category;
pub mod columns;
pub mod config;
pub mod error;
pub mod labels;

pub use category::{CategoryMap, EncodingOrder, Encodings, MISSING_LABEL};
pub use config::{
    AppConfig, ChartFormat, ChartOptions, CompoundPart, CompoundSplit, LabelNormalization,
    PartType, PipelineConfig, RegressionOptions,
};
pub use error::{ModelError, Result};
pub use labels::CodeLabels;
