//! Canonicalization of category labels.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use sleep_common::{column_string_values, has_column};
use tracing::debug;

use crate::error::Result;

fn replace_labels(column: &Column, mapping: &BTreeMap<String, String>) -> (Column, usize) {
    if column.dtype() != &DataType::String || mapping.is_empty() {
        return (column.clone(), 0);
    }
    let mut replaced = 0usize;
    let values: Vec<Option<String>> = column_string_values(column)
        .into_iter()
        .map(|value| {
            value.map(|label| match mapping.get(&label) {
                Some(canonical) => {
                    replaced += 1;
                    canonical.clone()
                }
                None => label,
            })
        })
        .collect();
    let series = Series::new(column.name().clone(), values);
    (series.into_column(), replaced)
}

/// Replace every label found in `mapping` with its canonical form.
///
/// Other labels and nulls pass through. Non-string columns are returned
/// unchanged.
pub fn normalize_column(column: &Column, mapping: &BTreeMap<String, String>) -> Column {
    replace_labels(column, mapping).0
}

/// Normalize `column_name` in place, returning how many cells changed.
///
/// A column the table does not have is skipped and counts as zero.
pub fn normalize_labels(
    df: &mut DataFrame,
    column_name: &str,
    mapping: &BTreeMap<String, String>,
) -> Result<usize> {
    if !has_column(df, column_name) {
        debug!(column = column_name, "normalization skipped, column absent");
        return Ok(0);
    }
    let (normalized, replaced) = replace_labels(df.column(column_name)?, mapping);
    if replaced > 0 {
        df.with_column(normalized)?;
    }
    debug!(column = column_name, replaced, "labels normalized");
    Ok(replaced)
}
