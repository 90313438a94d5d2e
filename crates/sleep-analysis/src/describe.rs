//! Descriptive statistics per column.

use polars::prelude::DataFrame;

use crate::error::Result;
use crate::numeric::numeric_column;

/// Summary of one numeric column. Nulls are excluded from every figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator).
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Quantile of sorted values with linear interpolation between ranks.
///
/// `q` is clamped to `[0, 1]`; an empty slice gives `NaN`.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        len => {
            let rank = q.clamp(0.0, 1.0) * (len - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}

fn summarize(column: &str, values: &[Option<f64>]) -> ColumnSummary {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(f64::total_cmp);
    let count = present.len();

    let mean = if count == 0 {
        f64::NAN
    } else {
        present.iter().sum::<f64>() / count as f64
    };
    let std = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = present.iter().map(|v| (v - mean) * (v - mean)).sum();
        (ss / (count - 1) as f64).sqrt()
    };

    ColumnSummary {
        column: column.to_string(),
        count,
        mean,
        std,
        min: present.first().copied().unwrap_or(f64::NAN),
        q25: quantile(&present, 0.25),
        median: quantile(&present, 0.5),
        q75: quantile(&present, 0.75),
        max: present.last().copied().unwrap_or(f64::NAN),
    }
}

/// Summarize each named numeric column, in the order given.
///
/// # Errors
///
/// Fails on the first column that is absent or not numeric.
pub fn describe<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<Vec<ColumnSummary>> {
    columns
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let values = numeric_column(df, name)?;
            Ok(summarize(name, &values))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnalysisError;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_describe_ignores_nulls() {
        let df = DataFrame::new(vec![
            Series::new("Heart Rate".into(), vec![Some(70i64), None, Some(80), Some(75)])
                .into_column(),
        ])
        .unwrap();
        let summary = describe(&df, &["Heart Rate"]).unwrap().remove(0);

        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, 75.0);
        assert_eq!(summary.std, 5.0);
        assert_eq!(summary.min, 70.0);
        assert_eq!(summary.median, 75.0);
        assert_eq!(summary.max, 80.0);
    }

    #[test]
    fn test_describe_rejects_text() {
        let df = DataFrame::new(vec![
            Series::new("Occupation".into(), vec!["Nurse"]).into_column(),
        ])
        .unwrap();
        let err = describe(&df, &["Occupation"]).unwrap_err();
        assert!(matches!(err, AnalysisError::NonNumericColumn { .. }));
    }
}
