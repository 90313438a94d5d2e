//! Derivation of typed columns from compound string values.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use sleep_common::{column_string_values, has_column, parse_f64, parse_i64};
use sleep_model::{CompoundSplit, PartType};
use tracing::debug;

use crate::error::{Result, TransformError};

enum PartValues {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl PartValues {
    fn with_capacity(part_type: PartType, capacity: usize) -> Self {
        match part_type {
            PartType::Int => Self::Int(Vec::with_capacity(capacity)),
            PartType::Float => Self::Float(Vec::with_capacity(capacity)),
            PartType::Text => Self::Text(Vec::with_capacity(capacity)),
        }
    }

    /// Convert and append one piece, returning the reason on failure.
    fn push(&mut self, piece: &str) -> std::result::Result<(), String> {
        match self {
            Self::Int(values) => {
                let value =
                    parse_i64(piece).ok_or_else(|| format!("'{piece}' is not an integer"))?;
                values.push(value);
            }
            Self::Float(values) => {
                let value = parse_f64(piece).ok_or_else(|| format!("'{piece}' is not a number"))?;
                values.push(value);
            }
            Self::Text(values) => values.push(piece.to_string()),
        }
        Ok(())
    }

    fn into_column(self, name: &str) -> Column {
        match self {
            Self::Int(values) => Series::new(name.into(), values),
            Self::Float(values) => Series::new(name.into(), values),
            Self::Text(values) => Series::new(name.into(), values),
        }
        .into_column()
    }
}

fn check_split(df: &DataFrame, split: &CompoundSplit) -> Result<()> {
    let column = &split.source_column;
    if split.separator.is_empty() {
        return Err(TransformError::InvalidSplit {
            column: column.clone(),
            message: "separator is empty".to_string(),
        });
    }
    if split.parts.is_empty() {
        return Err(TransformError::InvalidSplit {
            column: column.clone(),
            message: "no output parts".to_string(),
        });
    }
    if !has_column(df, column) {
        return Err(TransformError::ColumnNotFound {
            column: column.clone(),
        });
    }
    for (idx, part) in split.parts.iter().enumerate() {
        let repeated = split.parts[..idx].iter().any(|p| p.name == part.name);
        if repeated || has_column(df, &part.name) {
            return Err(TransformError::DuplicateColumn {
                column: part.name.clone(),
            });
        }
    }
    Ok(())
}

/// Split `split.source_column` into one typed column per part.
///
/// Every value must split on the separator into exactly as many pieces as
/// there are parts, and every trimmed piece must convert to its part type.
/// The new columns are appended in part order and the source column is
/// dropped.
///
/// # Errors
///
/// - [`TransformError::ColumnNotFound`] if the source column is absent
/// - [`TransformError::DuplicateColumn`] if a part name is already taken
/// - [`TransformError::MalformedCompoundValue`] for the first value (missing
///   values included) that does not fit
///
/// On error the table is left exactly as it was.
pub fn split_compound(df: &mut DataFrame, split: &CompoundSplit) -> Result<()> {
    check_split(df, split)?;
    let source = &split.source_column;
    let values = column_string_values(df.column(source)?);

    let mut parts: Vec<PartValues> = split
        .parts
        .iter()
        .map(|part| PartValues::with_capacity(part.part_type, values.len()))
        .collect();

    for (row, value) in values.iter().enumerate() {
        let malformed = |value: &str, reason: String| TransformError::MalformedCompoundValue {
            column: source.clone(),
            row,
            value: value.to_string(),
            reason,
        };
        let Some(value) = value else {
            return Err(malformed("", "value is missing".to_string()));
        };
        let pieces: Vec<&str> = value.split(split.separator.as_str()).collect();
        if pieces.len() != split.parts.len() {
            return Err(malformed(
                value,
                format!(
                    "expected {} parts separated by '{}', found {}",
                    split.parts.len(),
                    split.separator,
                    pieces.len()
                ),
            ));
        }
        for (target, piece) in parts.iter_mut().zip(pieces) {
            target
                .push(piece.trim())
                .map_err(|reason| malformed(value, reason))?;
        }
    }

    // Work on a copy so a failure part-way leaves `df` untouched.
    let mut updated = df.clone();
    for (part, values) in split.parts.iter().zip(parts) {
        updated.with_column(values.into_column(&part.name))?;
    }
    updated.drop_in_place(source)?;
    *df = updated;

    debug!(
        column = %source,
        parts = split.parts.len(),
        rows = values.len(),
        "compound column split"
    );
    Ok(())
}
