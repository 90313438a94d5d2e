//! Integration tests for regression and correlation on small tables.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;
use sleep_analysis::{AnalysisError, correlation, linear_regression, linear_regression_with};
use sleep_model::RegressionOptions;

fn linear_frame(rows: usize) -> DataFrame {
    let xs: Vec<f64> = (0..rows).map(|i| i as f64 * 0.5 + 5.0).collect();
    let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
    DataFrame::new(vec![
        Series::new("Sleep Duration".into(), xs).into_column(),
        Series::new("Quality of Sleep".into(), ys).into_column(),
    ])
    .unwrap()
}

#[test]
fn exact_line_scores_perfectly() {
    let report = linear_regression(&linear_frame(20), "Sleep Duration", "Quality of Sleep").unwrap();

    assert!((report.r_squared - 1.0).abs() < 1e-9);
    assert!(report.mean_squared_error < 1e-12);
    assert!((report.slope - 2.0).abs() < 1e-9);
    assert!((report.intercept - 1.0).abs() < 1e-9);
    assert_eq!(report.test_rows, 4);
    assert_eq!(report.train_rows, 16);
}

#[test]
fn report_is_identical_across_runs() {
    let xs: Vec<f64> = (0..40).map(|i| f64::from(i % 7) + 4.0).collect();
    let ys: Vec<f64> = (0..40).map(|i| f64::from((i * 13) % 11)).collect();
    let df = DataFrame::new(vec![
        Series::new("Stress Level".into(), xs).into_column(),
        Series::new("Heart Rate".into(), ys).into_column(),
    ])
    .unwrap();

    let first = linear_regression(&df, "Stress Level", "Heart Rate").unwrap();
    let second = linear_regression(&df, "Stress Level", "Heart Rate").unwrap();

    assert_eq!(first, second);
}

#[test]
fn rows_with_missing_values_are_dropped() {
    let xs: Vec<Option<f64>> = (0..12)
        .map(|i| if i == 3 { None } else { Some(f64::from(i)) })
        .collect();
    let ys: Vec<Option<f64>> = (0..12)
        .map(|i| if i == 7 { None } else { Some(f64::from(i) * 3.0) })
        .collect();
    let df = DataFrame::new(vec![
        Series::new("Age".into(), xs).into_column(),
        Series::new("Daily Steps".into(), ys).into_column(),
    ])
    .unwrap();

    let report = linear_regression(&df, "Age", "Daily Steps").unwrap();

    assert_eq!(report.train_rows + report.test_rows, 10);
    assert!((report.slope - 3.0).abs() < 1e-9);
}

#[test]
fn tiny_table_is_insufficient() {
    let err = linear_regression(&linear_frame(4), "Sleep Duration", "Quality of Sleep").unwrap_err();
    assert!(matches!(err, AnalysisError::InsufficientData { required: 2, actual: 1 }));
}

#[test]
fn absent_predictor_is_reported() {
    let err = linear_regression(&linear_frame(20), "Age", "Quality of Sleep").unwrap_err();
    assert!(matches!(err, AnalysisError::ColumnNotFound { ref column } if column == "Age"));
}

#[test]
fn custom_test_fraction_changes_partition_sizes() {
    let options = RegressionOptions {
        test_fraction: 0.5,
        seed: 7,
    };
    let report =
        linear_regression_with(&linear_frame(20), "Sleep Duration", "Quality of Sleep", &options)
            .unwrap();
    assert_eq!(report.test_rows, 10);
    assert_eq!(report.train_rows, 10);
}

proptest! {
    #[test]
    fn self_correlation_is_one(values in prop::collection::vec(-1000.0f64..1000.0, 2..50)) {
        let df = DataFrame::new(vec![
            Series::new("Heart Rate".into(), values.clone()).into_column(),
        ])
        .unwrap();
        let r = correlation(&df, "Heart Rate", "Heart Rate").unwrap();
        let constant = values.iter().all(|v| *v == values[0]);
        if constant {
            prop_assert!(r.is_nan());
        } else {
            prop_assert!((r - 1.0).abs() < 1e-9);
        }
    }
}
