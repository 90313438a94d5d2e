//! Polars value helpers.
//!
//! Conversions between Polars `AnyValue`/`Column` data and plain Rust values,
//! plus the numeric parsing rules shared by ingestion and transformation.

use polars::prelude::{AnyValue, Column, DataFrame, DataType};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats without
/// unnecessary trailing zeros, so `7.0` reads back as `"7"`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use sleep_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int64(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("Nurse")), "Nurse");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => {
            let s = other.to_string();
            if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use sleep_common::format_numeric;
///
/// assert_eq!(format_numeric(7.0), "7");
/// assert_eq!(format_numeric(6.10), "6.1");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for null or non-numeric values.
///
/// Strings are parsed, so a text column of numbers still yields numbers.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Converts an integer `AnyValue` to `i64`.
///
/// Only integer variants qualify (plus floats with no fractional part), so a
/// text cell never reads as a category code.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float32(v) if v.fract() == 0.0 => Some(v as i64),
        AnyValue::Float64(v) if v.fract() == 0.0 => Some(v as i64),
        _ => None,
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
///
/// Non-finite spellings such as `NaN` or `inf` are rejected so that a
/// column of those never counts as numeric.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a string as `i64`, returning `None` for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Returns true for integer and floating-point dtypes.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Returns true if the frame has a column with exactly this name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names()
        .iter()
        .any(|column| column.as_str() == name)
}

/// Extracts a column as optional floats, one entry per row.
pub fn column_f64_values(column: &Column) -> Vec<Option<f64>> {
    (0..column.len())
        .map(|idx| column.get(idx).ok().and_then(any_to_f64))
        .collect()
}

/// Extracts a column as optional strings, one entry per row.
///
/// Nulls stay `None`; every other value uses [`any_to_string`].
pub fn column_string_values(column: &Column) -> Vec<Option<String>> {
    (0..column.len())
        .map(|idx| match column.get(idx) {
            Ok(AnyValue::Null) | Err(_) => None,
            Ok(value) => Some(any_to_string(value)),
        })
        .collect()
}
