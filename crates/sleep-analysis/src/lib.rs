//! Statistics over the preprocessed sleep-health table.
//!
//! Every function takes the table by shared reference and never changes it.
//!
//! - [`correlation`] / [`correlation_matrix`]: Pearson coefficients
//! - [`linear_regression`]: one-predictor OLS with a seeded train/test split
//! - [`describe`]: count, mean, spread and quartiles per column

mod correlation;
mod describe;
mod error;
mod numeric;
mod regression;

// === Errors ===
pub use error::{AnalysisError, Result};

// === Correlation ===
pub use correlation::{CorrelationMatrix, correlation, correlation_matrix, pearson};

// === Regression ===
pub use regression::{
    DEFAULT_SPLIT_SEED, LineFit, RegressionReport, TrainTestSplit, fit_line, linear_regression,
    linear_regression_with, train_test_split,
};

// === Descriptive statistics ===
pub use describe::{ColumnSummary, describe, quantile};

// === Column access ===
pub use numeric::{numeric_column, paired_values};
