use std::path::PathBuf;

use sleep_analysis::{ColumnSummary, RegressionReport};

#[derive(Debug)]
pub struct RunOutcome {
    pub source: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub encoded_columns: Vec<String>,
    pub mappings_out: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub charts: Vec<PathBuf>,
    pub correlations: Vec<CorrelationRow>,
    pub regressions: Vec<RegressionReport>,
    pub summaries: Vec<ColumnSummary>,
}

#[derive(Debug)]
pub struct CorrelationRow {
    pub x: String,
    pub y: String,
    pub r: f64,
}

#[derive(Debug)]
pub struct ColumnSchema {
    pub name: String,
    pub dtype: String,
    pub nulls: usize,
    pub sample: Option<String>,
}
