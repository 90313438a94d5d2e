//! Integration tests rendering every chart into a temporary directory.

use std::fs;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use sleep_chart::{ChartError, ChartRenderer, ColumnLabels};
use sleep_model::{ChartFormat, CodeLabels};
use tempfile::TempDir;

fn clean_table() -> DataFrame {
    DataFrame::new(vec![
        Series::new("Age".into(), vec![27i64, 28, 29, 36, 41, 44, 49, 53, 57, 59]).into_column(),
        Series::new(
            "Sleep Duration".into(),
            vec![6.1, 6.2, 5.9, 7.8, 6.5, 7.1, 8.0, 6.0, 7.4, 8.1],
        )
        .into_column(),
        Series::new("Quality of Sleep".into(), vec![6i64, 6, 4, 7, 5, 7, 9, 5, 8, 9]).into_column(),
        Series::new("Stress Level".into(), vec![6i64, 8, 8, 6, 7, 5, 3, 7, 4, 3]).into_column(),
        Series::new("BMI Category".into(), vec![1i64, 0, 2, 0, 1, 0, 0, 2, 1, 0]).into_column(),
        Series::new("Sleep Disorder".into(), vec![0i64, 0, 2, 0, 1, 0, 0, 2, 1, 0]).into_column(),
        Series::new("Systolic BP".into(), vec![126i64, 125, 140, 120, 132, 118, 115, 142, 135, 117])
            .into_column(),
        Series::new("Diastolic BP".into(), vec![83i64, 80, 90, 80, 87, 76, 75, 92, 88, 76])
            .into_column(),
        Series::new("Occupation".into(), vec!["Nurse"; 10]).into_column(),
    ])
    .unwrap()
}

fn labels() -> ColumnLabels {
    ColumnLabels::from([
        ("BMI Category".to_string(), CodeLabels::bmi_default()),
        (
            "Sleep Disorder".to_string(),
            CodeLabels::sleep_disorder_default(),
        ),
    ])
}

#[test]
fn every_chart_writes_one_file() {
    let dir = TempDir::new().unwrap();
    let df = clean_table();
    let before = df.clone();
    let renderer = ChartRenderer::new(dir.path());
    let labels = labels();

    let mut written = vec![renderer.correlation_heatmap(&df).unwrap()];
    written.extend(
        renderer
            .histograms(&df, &["Age", "Sleep Duration"])
            .unwrap(),
    );
    written.extend(
        renderer
            .bar_charts(&df, &["BMI Category", "Occupation"], &labels)
            .unwrap(),
    );
    written.push(
        renderer
            .scatter(&df, "Sleep Duration", "Quality of Sleep", Some("BMI Category"), &labels)
            .unwrap(),
    );
    written.push(
        renderer
            .regression_plot(&df, "Stress Level", "Quality of Sleep")
            .unwrap(),
    );
    written.extend(
        renderer
            .bp_boxplots(&df, &["Systolic BP", "Diastolic BP"], "BMI Category", &labels)
            .unwrap(),
    );
    written.push(
        renderer
            .bmi_age_relationship(&df, "Age", "BMI Category", &CodeLabels::bmi_default())
            .unwrap(),
    );
    written.push(
        renderer
            .sleep_disorder_bmi(
                &df,
                "BMI Category",
                "Sleep Disorder",
                &CodeLabels::bmi_default(),
                &CodeLabels::sleep_disorder_default(),
            )
            .unwrap(),
    );

    assert_eq!(written.len(), 11);
    for path in &written {
        assert!(path.exists(), "missing {}", path.display());
        assert_eq!(path.extension().unwrap(), "svg");
    }
    assert!(df.equals_missing(&before));
}

#[test]
fn bar_chart_shows_display_labels() {
    let dir = TempDir::new().unwrap();
    let renderer = ChartRenderer::new(dir.path());

    let paths = renderer
        .bar_charts(&clean_table(), &["BMI Category"], &labels())
        .unwrap();

    let svg = fs::read_to_string(&paths[0]).unwrap();
    assert!(paths[0].ends_with("bar_bmi_category.svg"));
    assert!(svg.contains(">Normal<"));
    assert!(svg.contains(">Overweight<"));
    assert!(svg.contains(">Obese<"));
}

#[test]
fn stacked_chart_lists_age_groups() {
    let dir = TempDir::new().unwrap();
    let renderer = ChartRenderer::new(dir.path());

    let path = renderer
        .bmi_age_relationship(&clean_table(), "Age", "BMI Category", &CodeLabels::bmi_default())
        .unwrap();

    let svg = fs::read_to_string(path).unwrap();
    for group in ["27-34", "35-42", "43-50", "51-59"] {
        assert!(svg.contains(group), "missing age group {group}");
    }
}

#[test]
fn absent_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let renderer = ChartRenderer::new(dir.path());

    let err = renderer
        .histograms(&clean_table(), &["Heart Rate"])
        .unwrap_err();

    assert!(matches!(err, ChartError::ColumnNotFound { ref column } if column == "Heart Rate"));
}

#[test]
fn text_column_cannot_be_a_histogram() {
    let dir = TempDir::new().unwrap();
    let renderer = ChartRenderer::new(dir.path());

    let err = renderer
        .histograms(&clean_table(), &["Occupation"])
        .unwrap_err();

    assert!(matches!(err, ChartError::NonNumericColumn { .. }));
}

#[test]
fn png_format_changes_extension() {
    let dir = TempDir::new().unwrap();
    let renderer = ChartRenderer::new(dir.path()).with_format(ChartFormat::Png);

    let path = renderer
        .regression_plot(&clean_table(), "Sleep Duration", "Quality of Sleep")
        .unwrap();

    assert_eq!(path.extension().unwrap(), "png");
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
