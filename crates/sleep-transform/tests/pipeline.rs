//! End-to-end preprocessing tests over CSV fixtures.

use std::fs;
use std::path::PathBuf;

use polars::prelude::{AnyValue, DataType};
use sleep_common::has_column;
use sleep_model::columns::CATEGORICAL_COLUMNS;
use sleep_model::{EncodingOrder, PipelineConfig};
use sleep_transform::{
    PipelineError, Stage, TransformError, decode_column, preprocess, preprocess_with,
};
use tempfile::TempDir;

const HEADER: &str = "Person ID,Gender,Age,Occupation,Sleep Duration,Quality of Sleep,Physical Activity Level,Stress Level,BMI Category,Blood Pressure,Heart Rate,Daily Steps,Sleep Disorder";

const ROWS: [&str; 10] = [
    "1,Male,27,Software Engineer,6.1,6,42,6,Overweight,126/83,77,4200,None",
    "2,Male,28,Doctor,6.2,6,60,8,Normal,125/80,75,10000,None",
    "3,Male,28,Doctor,6.2,6,60,8,Normal,125/80,75,10000,None",
    "4,Male,28,Sales Representative,5.9,4,30,8,Obese,140/90,85,3000,Sleep Apnea",
    "5,Male,28,Sales Representative,5.9,4,30,8,Obese,140/90,85,3000,Sleep Apnea",
    "6,Male,28,Software Engineer,5.9,4,30,8,Obese,140/90,85,3000,Insomnia",
    "7,Male,29,Teacher,6.3,6,40,7,Obese,140/90,82,3500,Insomnia",
    "8,Male,29,Doctor,7.8,7,75,6,Normal Weight,120/80,70,8000,None",
    "9,Male,29,Doctor,7.8,7,75,6,Normal,120/80,70,8000,None",
    "10,Female,29,Nurse,6.5,5,40,7,Overweight,132/87,80,4000,Insomnia",
];

fn write_csv(dir: &TempDir, header: &str, rows: &[&str]) -> PathBuf {
    let mut content = String::from(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    let path = dir.path().join("sleep.csv");
    fs::write(&path, content).expect("write csv");
    path
}

#[test]
fn normal_weight_and_normal_share_a_code() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, HEADER, &ROWS);

    let out = preprocess(&path, &CATEGORICAL_COLUMNS).expect("preprocess");

    let bmi = out.table.column("BMI Category").unwrap();
    assert_eq!(bmi.dtype(), &DataType::Int64);
    // Rows 8 and 9 carried "Normal Weight" and "Normal".
    assert_eq!(bmi.get(7).unwrap(), bmi.get(8).unwrap());
    let map = out.encodings.get("BMI Category").unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.code_of("Normal Weight"), None);
}

#[test]
fn codes_stay_in_range_and_decode_to_labels() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, HEADER, &ROWS);

    let out = preprocess(&path, &CATEGORICAL_COLUMNS).unwrap();

    for name in CATEGORICAL_COLUMNS {
        let map = out.encodings.get(name).expect("column encoded");
        let column = out.table.column(name).unwrap();
        for idx in 0..column.len() {
            match column.get(idx).unwrap() {
                AnyValue::Int64(code) => assert!(code >= 0 && (code as usize) < map.len()),
                other => panic!("unexpected value {other:?} in {name}"),
            }
        }
    }

    let occupation = out.encodings.get("Occupation").unwrap();
    let decoded = decode_column(out.table.column("Occupation").unwrap(), occupation);
    assert_eq!(decoded.get(0).unwrap(), AnyValue::String("Software Engineer"));
    assert_eq!(decoded.get(9).unwrap(), AnyValue::String("Nurse"));
}

#[test]
fn blood_pressure_is_replaced_by_two_integer_columns() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, HEADER, &ROWS);

    let out = preprocess(&path, &CATEGORICAL_COLUMNS).unwrap();

    assert!(!has_column(&out.table, "Blood Pressure"));
    let systolic = out.table.column("Systolic BP").unwrap();
    let diastolic = out.table.column("Diastolic BP").unwrap();
    assert_eq!(systolic.get(0).unwrap(), AnyValue::Int64(126));
    assert_eq!(diastolic.get(0).unwrap(), AnyValue::Int64(83));
    assert_eq!(out.table.height(), 10);
}

#[test]
fn table_without_blood_pressure_still_preprocesses() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "Gender,Age,BMI Category,Sleep Disorder",
        &["Male,27,Overweight,None", "Female,29,Normal Weight,Insomnia"],
    );

    let out = preprocess(&path, &CATEGORICAL_COLUMNS).expect("preprocess");

    assert!(!has_column(&out.table, "Systolic BP"));
    assert!(!has_column(&out.table, "Diastolic BP"));
    // Occupation is requested but absent: skipped, not fatal.
    assert!(!out.encodings.contains("Occupation"));
    assert_eq!(out.encodings.len(), 3);
}

#[test]
fn sorted_order_matches_lexicographic_codes() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, HEADER, &ROWS);
    let config = PipelineConfig::default().with_encoding_order(EncodingOrder::Sorted);

    let out = preprocess_with(&path, &config).unwrap();

    let disorder = out.encodings.get("Sleep Disorder").unwrap();
    assert_eq!(disorder.labels(), ["Insomnia", "None", "Sleep Apnea"]);
}

#[test]
fn malformed_blood_pressure_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    let mut rows = ROWS.to_vec();
    rows[4] = "5,Male,28,Sales Representative,5.9,4,30,8,Obese,140,85,3000,Sleep Apnea";
    let path = write_csv(&dir, HEADER, &rows);

    let err = preprocess(&path, &CATEGORICAL_COLUMNS).expect_err("malformed value");

    assert_eq!(err.stage(), Stage::Split);
    match err {
        PipelineError::Transform {
            source: TransformError::MalformedCompoundValue { column, row, value, .. },
            ..
        } => {
            assert_eq!(column, "Blood Pressure");
            assert_eq!(row, 4);
            assert_eq!(value, "140");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_fails_at_load() {
    let dir = TempDir::new().unwrap();
    let err = preprocess(&dir.path().join("absent.csv"), &CATEGORICAL_COLUMNS).unwrap_err();
    assert_eq!(err.stage(), Stage::Load);
}
