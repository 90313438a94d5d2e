//! One-predictor linear regression with a held-out test partition.
//!
//! Rows with a missing predictor or target are dropped, the remaining row
//! indices are shuffled with a seeded ChaCha8 generator, the first
//! `ceil(n * test_fraction)` indices form the test partition and the rest
//! the training partition. The line is fitted on training rows only and
//! scored on test rows, so the same table and options always give the same
//! report.

use polars::prelude::DataFrame;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use sleep_model::RegressionOptions;
use tracing::{debug, info};

use crate::error::{AnalysisError, Result};
use crate::numeric::paired_values;

/// Seed of the train/test shuffle unless configured otherwise.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Smallest partition a regression can be fitted or scored on.
const MIN_PARTITION_ROWS: usize = 2;

/// Fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LineFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares over all points.
///
/// A constant predictor gives a flat line through the mean of `ys`.
///
/// # Errors
///
/// [`AnalysisError::InsufficientData`] with fewer than two points.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Result<LineFit> {
    let n = xs.len().min(ys.len());
    if n < MIN_PARTITION_ROWS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_PARTITION_ROWS,
            actual: n,
        });
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        sxy += (x - mean_x) * (y - mean_y);
        sxx += (x - mean_x) * (x - mean_x);
    }
    let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    Ok(LineFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Row indices of the two partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..rows` and cut off `ceil(rows * test_fraction)` test indices.
pub fn train_test_split(rows: usize, options: &RegressionOptions) -> Result<TrainTestSplit> {
    if !(options.test_fraction > 0.0 && options.test_fraction < 1.0) {
        return Err(AnalysisError::InvalidOptions(format!(
            "test_fraction must be between 0 and 1, got {}",
            options.test_fraction
        )));
    }
    let mut indices: Vec<usize> = (0..rows).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    indices.shuffle(&mut rng);

    let test_rows = ((rows as f64) * options.test_fraction).ceil() as usize;
    let train = indices.split_off(test_rows.min(rows));
    Ok(TrainTestSplit {
        train,
        test: indices,
    })
}

/// Outcome of [`linear_regression`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionReport {
    pub predictor: String,
    pub target: String,
    pub slope: f64,
    pub intercept: f64,
    /// Mean squared error on the test partition.
    pub mean_squared_error: f64,
    /// Coefficient of determination on the test partition.
    pub r_squared: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Regress `target` on `predictor` with the default options (20% test, seed 42).
pub fn linear_regression(df: &DataFrame, predictor: &str, target: &str) -> Result<RegressionReport> {
    linear_regression_with(df, predictor, target, &RegressionOptions::default())
}

/// Regress `target` on `predictor`.
///
/// # Errors
///
/// - [`AnalysisError::ColumnNotFound`] / [`AnalysisError::NonNumericColumn`]
///   for unusable columns
/// - [`AnalysisError::InsufficientData`] if either partition has fewer than
///   two rows
pub fn linear_regression_with(
    df: &DataFrame,
    predictor: &str,
    target: &str,
    options: &RegressionOptions,
) -> Result<RegressionReport> {
    let (xs, ys) = paired_values(df, predictor, target)?;
    let split = train_test_split(xs.len(), options)?;
    let smallest = split.train.len().min(split.test.len());
    if smallest < MIN_PARTITION_ROWS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_PARTITION_ROWS,
            actual: smallest,
        });
    }

    let train_x: Vec<f64> = split.train.iter().map(|&idx| xs[idx]).collect();
    let train_y: Vec<f64> = split.train.iter().map(|&idx| ys[idx]).collect();
    let fit = fit_line(&train_x, &train_y)?;

    let test_y: Vec<f64> = split.test.iter().map(|&idx| ys[idx]).collect();
    let predicted: Vec<f64> = split.test.iter().map(|&idx| fit.predict(xs[idx])).collect();
    let mean_squared_error = mean_squared_error(&test_y, &predicted);
    let r_squared = r_squared(&test_y, &predicted);

    debug!(
        predictor,
        target,
        dropped = df.height() - xs.len(),
        seed = options.seed,
        "regression partitions drawn"
    );
    info!(
        predictor,
        target,
        slope = fit.slope,
        intercept = fit.intercept,
        mse = mean_squared_error,
        r_squared,
        "regression fitted"
    );

    Ok(RegressionReport {
        predictor: predictor.to_string(),
        target: target.to_string(),
        slope: fit.slope,
        intercept: fit.intercept,
        mean_squared_error,
        r_squared,
        train_rows: split.train.len(),
        test_rows: split.test.len(),
    })
}

fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let total: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .sum();
    total / actual.len() as f64
}

/// `1 - SS_res / SS_tot`; a constant target scores 1 when predicted exactly
/// and 0 otherwise.
fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean) * (a - mean)).sum();
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}
