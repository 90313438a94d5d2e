//! Pearson correlation.

use polars::prelude::DataFrame;
use sleep_common::{column_f64_values, is_numeric_dtype};
use tracing::debug;

use crate::error::Result;
use crate::numeric::paired_values;

/// Pearson coefficient of two equally long samples.
///
/// Returns `NaN` when fewer than two pairs exist or either side has zero
/// variance, since the coefficient is undefined there.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

/// Pearson correlation between two numeric columns, over rows where both
/// are present.
///
/// # Errors
///
/// - [`crate::AnalysisError::ColumnNotFound`] if either column is absent
/// - [`crate::AnalysisError::NonNumericColumn`] if either column holds text
pub fn correlation(df: &DataFrame, col_a: &str, col_b: &str) -> Result<f64> {
    let (xs, ys) = paired_values(df, col_a, col_b)?;
    let r = pearson(&xs, &ys);
    debug!(col_a, col_b, pairs = xs.len(), r, "correlation computed");
    Ok(r)
}

/// Pairwise correlations of every numeric column of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Column names in table order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row-major coefficients; `values()[i][j]` pairs `columns()[i]` and `columns()[j]`.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Coefficient for two named columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|name| name == a)?;
        let j = self.columns.iter().position(|name| name == b)?;
        Some(self.values[i][j])
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Correlate every pair of numeric columns (pairwise-complete rows).
pub fn correlation_matrix(df: &DataFrame) -> CorrelationMatrix {
    let numeric: Vec<(String, Vec<Option<f64>>)> = df
        .get_columns()
        .iter()
        .filter(|column| is_numeric_dtype(column.dtype()))
        .map(|column| (column.name().to_string(), column_f64_values(column)))
        .collect();

    let n = numeric.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let (xs, ys): (Vec<f64>, Vec<f64>) = numeric[i]
                .1
                .iter()
                .zip(&numeric[j].1)
                .filter_map(|pair| match pair {
                    (Some(x), Some(y)) => Some((*x, *y)),
                    _ => None,
                })
                .unzip();
            let r = pearson(&xs, &ys);
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    debug!(columns = n, "correlation matrix computed");

    CorrelationMatrix {
        columns: numeric.into_iter().map(|(name, _)| name).collect(),
        values,
    }
}
