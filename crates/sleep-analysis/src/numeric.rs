//! Numeric column access with analysis errors.

use polars::prelude::DataFrame;
use sleep_common::{column_f64_values, has_column, is_numeric_dtype};

use crate::error::{AnalysisError, Result};

/// Values of a numeric column, one entry per row (`None` for nulls).
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    if !has_column(df, name) {
        return Err(AnalysisError::ColumnNotFound {
            column: name.to_string(),
        });
    }
    let column = df.column(name)?;
    if !is_numeric_dtype(column.dtype()) {
        return Err(AnalysisError::NonNumericColumn {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        });
    }
    Ok(column_f64_values(column))
}

/// Rows where both columns have a value, as `(xs, ys)`.
pub fn paired_values(df: &DataFrame, x: &str, y: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let xs = numeric_column(df, x)?;
    let ys = numeric_column(df, y)?;
    Ok(xs
        .into_iter()
        .zip(ys)
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        })
        .unzip())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_paired_values_drop_incomplete_rows() {
        let df = DataFrame::new(vec![
            Series::new("Age".into(), vec![Some(27i64), None, Some(29)]).into_column(),
            Series::new("Heart Rate".into(), vec![Some(77.0), Some(75.0), None]).into_column(),
        ])
        .unwrap();
        let (xs, ys) = paired_values(&df, "Age", "Heart Rate").unwrap();
        assert_eq!(xs, vec![27.0]);
        assert_eq!(ys, vec![77.0]);
    }

    #[test]
    fn test_text_column_is_rejected() {
        let df = DataFrame::new(vec![
            Series::new("Occupation".into(), vec!["Nurse"]).into_column(),
        ])
        .unwrap();
        let err = numeric_column(&df, "Occupation").unwrap_err();
        assert!(matches!(err, AnalysisError::NonNumericColumn { .. }));
    }

    #[test]
    fn test_absent_column_is_rejected() {
        let df = DataFrame::new(vec![Series::new("Age".into(), vec![27i64]).into_column()]).unwrap();
        let err = numeric_column(&df, "Daily Steps").unwrap_err();
        assert!(matches!(err, AnalysisError::ColumnNotFound { ref column } if column == "Daily Steps"));
    }
}
