//! CSV file reading into a typed `DataFrame`.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord};
use polars::prelude::{Column, DataFrame};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};

use super::infer::infer_column;

/// Tables wider than this trigger a warning.
pub const MAX_COLUMNS_WARNING: usize = 500;

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().to_string()
}

/// Fail early with a precise error when the path is missing or empty.
fn check_file(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn csv_error(path: &Path, err: csv::Error) -> IngestError {
    if err.is_io_error() {
        if let csv::ErrorKind::Io(source) = err.into_kind() {
            return IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            };
        }
        return IngestError::CsvParse {
            path: path.to_path_buf(),
            message: "I/O error".to_string(),
        };
    }
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn parse_headers(path: &Path, record: &StringRecord) -> Result<Vec<String>> {
    let headers: Vec<String> = record.iter().map(normalize_header).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::NoHeader {
            path: path.to_path_buf(),
        });
    }
    let mut seen = BTreeSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(IngestError::DuplicateColumn {
                column: header.clone(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(headers)
}

/// Loads a CSV file into a `DataFrame`.
///
/// Column names come from the header row; each column's type is inferred
/// from its cells (see [`crate::infer_kind`]). Every data row must have
/// exactly as many fields as the header.
///
/// # Errors
///
/// - [`IngestError::FileNotFound`] if the path does not exist
/// - [`IngestError::EmptyCsv`] if the file is empty or has no data rows
/// - [`IngestError::InconsistentRow`] on the first row with a wrong field count
/// - [`IngestError::CsvParse`] for any other malformed input
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    let start = Instant::now();
    check_file(path)?;

    // Flexible so that ragged rows surface as InconsistentRow with a line number.
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;
    let header_record = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    let headers = parse_headers(path, &header_record)?;

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(path, e))?;
        if record.len() != headers.len() {
            let line = record
                .position()
                .map_or(idx as u64 + 2, csv::Position::line);
            return Err(IngestError::InconsistentRow {
                path: path.to_path_buf(),
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }
        for (column, value) in cells.iter_mut().zip(record.iter()) {
            column.push(normalize_cell(value));
        }
    }

    let row_count = cells.first().map_or(0, Vec::len);
    if row_count == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(&cells)
        .map(|(name, values)| infer_column(name, values))
        .collect();
    let df = DataFrame::new(columns)?;
    validate_table_shape(&df, path);

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );
    Ok(df)
}

/// Log the shape of a loaded table, warning about very wide inputs.
pub fn validate_table_shape(df: &DataFrame, path: &Path) {
    if df.width() > MAX_COLUMNS_WARNING {
        warn!(
            path = %path.display(),
            columns = df.width(),
            "dataset has more than {MAX_COLUMNS_WARNING} columns"
        );
    }
    for column in df.get_columns() {
        debug!(
            column = %column.name(),
            dtype = %column.dtype(),
            nulls = column.null_count(),
            "inferred column"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_normalize_header_collapses_whitespace() {
        assert_eq!(normalize_header("  Quality   of Sleep "), "Quality of Sleep");
        assert_eq!(normalize_header("\u{feff}Person ID"), "Person ID");
    }

    #[test]
    fn test_load_dataset_infers_types() {
        let file = create_temp_csv(
            "Gender,Age,Sleep Duration,Blood Pressure\n\
             Male,27,6.1,126/83\n\
             Female,28,6.2,125/80\n",
        );
        let df = load_dataset(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("Gender").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("Age").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("Sleep Duration").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Blood Pressure").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let file = create_temp_csv("Gender,Age\n");
        let result = load_dataset(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_duplicate_header_is_rejected() {
        let file = create_temp_csv("Age,Age\n1,2\n");
        let result = load_dataset(file.path());
        assert!(matches!(
            result,
            Err(IngestError::DuplicateColumn { ref column, .. }) if column == "Age"
        ));
    }
}
