//! Display relabeling of encoded columns.
//!
//! Charts show `"Obese"` rather than `2`. The lookup happens on a copy of
//! the table; the table handed to a chart is never modified.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};
use sleep_common::{any_to_i64, any_to_string, column_string_values, has_column, is_numeric_dtype};
use sleep_model::CodeLabels;

use crate::error::{ChartError, Result};

/// Display labels per column name.
pub type ColumnLabels = BTreeMap<String, CodeLabels>;

fn display_value(value: AnyValue<'_>, labels: &CodeLabels) -> Option<String> {
    if value.is_null() {
        return None;
    }
    match any_to_i64(value.clone()) {
        Some(code) => Some(
            labels
                .label_for(code)
                .map_or_else(|| code.to_string(), ToString::to_string),
        ),
        None => Some(any_to_string(value)),
    }
}

/// Column values as display text.
///
/// With `labels`, integer codes become their label and codes without one
/// become their number. Text columns are returned as they are.
pub fn display_values(column: &Column, labels: Option<&CodeLabels>) -> Vec<Option<String>> {
    match labels {
        Some(labels) if is_numeric_dtype(column.dtype()) => (0..column.len())
            .map(|idx| {
                column
                    .get(idx)
                    .ok()
                    .and_then(|value| display_value(value, labels))
            })
            .collect(),
        _ => column_string_values(column),
    }
}

/// Copy of `df` with each listed code column replaced by its display labels.
///
/// # Errors
///
/// [`ChartError::ColumnNotFound`] if a listed column is absent.
pub fn relabel_codes<'a, I>(df: &DataFrame, labels: I) -> Result<DataFrame>
where
    I: IntoIterator<Item = (&'a str, &'a CodeLabels)>,
{
    let mut relabeled = df.clone();
    for (name, table) in labels {
        if !has_column(df, name) {
            return Err(ChartError::ColumnNotFound {
                column: name.to_string(),
            });
        }
        let column = df.column(name)?;
        if !is_numeric_dtype(column.dtype()) {
            continue;
        }
        let values = display_values(column, Some(table));
        relabeled.with_column(Series::new(name.into(), values).into_column())?;
    }
    Ok(relabeled)
}
