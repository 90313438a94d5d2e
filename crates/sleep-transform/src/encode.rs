//! Categorical encoding.
//!
//! Each distinct label of a column gets an integer code `0..n`; the column is
//! replaced by its codes (Int64) and the label-to-code map is returned so the
//! labels can be recovered later. Missing cells are coded too, under
//! [`MISSING_LABEL`], so an encoded column holds no nulls.
//!
//! Labels are taken from each cell's string form, so a numeric column can be
//! encoded too (its values become labels such as `"27"`). Encoding a column
//! that already holds codes is not detected and simply re-codes the codes.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use sleep_common::{any_to_i64, column_string_values, has_column};
use sleep_model::{CategoryMap, EncodingOrder, Encodings, MISSING_LABEL};
use tracing::{debug, warn};

use crate::error::Result;

/// Encode a single column without touching any table.
pub fn encode_column(column: &Column, order: EncodingOrder) -> (Column, CategoryMap) {
    let values = column_string_values(column);
    let labels: Vec<&str> = values
        .iter()
        .map(|value| value.as_deref().unwrap_or(MISSING_LABEL))
        .collect();
    let map = CategoryMap::fit(labels.iter().copied(), order);
    let codes: Vec<Option<i64>> = labels.iter().map(|label| map.code_of(label)).collect();
    let encoded = Series::new(column.name().clone(), codes).into_column();
    (encoded, map)
}

/// Encode the named columns of `df` in place.
///
/// Columns the table does not have are skipped with a warning. The returned
/// [`Encodings`] hold one map per encoded column.
pub fn encode<S: AsRef<str>>(
    df: &mut DataFrame,
    column_names: &[S],
    order: EncodingOrder,
) -> Result<Encodings> {
    let mut encodings = Encodings::new();
    for name in column_names {
        let name = name.as_ref();
        if !has_column(df, name) {
            warn!(column = name, "categorical column not found, skipping");
            continue;
        }
        let (encoded, map) = encode_column(df.column(name)?, order);
        debug!(column = name, categories = map.len(), "column encoded");
        df.with_column(encoded)?;
        encodings.insert(name, map);
    }
    Ok(encodings)
}

/// Turn a code column back into labels using the map recorded for it.
///
/// The missing-cell code becomes null again, as do codes the map does not know.
pub fn decode_column(column: &Column, map: &CategoryMap) -> Column {
    let labels: Vec<Option<&str>> = (0..column.len())
        .map(|idx| {
            column
                .get(idx)
                .ok()
                .and_then(any_to_i64)
                .filter(|code| !map.is_missing_code(*code))
                .and_then(|code| map.label_of(code))
        })
        .collect();
    Series::new(column.name().clone(), labels).into_column()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{AnyValue, DataType};

    fn gender_column() -> Column {
        Series::new(
            "Gender".into(),
            vec![Some("Male"), Some("Female"), None, Some("Male")],
        )
        .into_column()
    }

    #[test]
    fn test_first_seen_codes() {
        let (encoded, map) = encode_column(&gender_column(), EncodingOrder::FirstSeen);
        assert_eq!(encoded.dtype(), &DataType::Int64);
        assert_eq!(map.code_of("Male"), Some(0));
        assert_eq!(map.code_of("Female"), Some(1));
        assert_eq!(map.missing_code(), Some(2));
        assert_eq!(encoded.get(2).unwrap(), AnyValue::Int64(2));
        assert_eq!(encoded.get(3).unwrap(), AnyValue::Int64(0));
    }

    #[test]
    fn test_sorted_codes() {
        let (encoded, map) = encode_column(&gender_column(), EncodingOrder::Sorted);
        assert_eq!(map.labels(), [MISSING_LABEL, "Female", "Male"]);
        assert_eq!(encoded.get(0).unwrap(), AnyValue::Int64(2));
    }

    #[test]
    fn test_decode_recovers_labels() {
        let original = gender_column();
        let (encoded, map) = encode_column(&original, EncodingOrder::FirstSeen);
        let decoded = decode_column(&encoded, &map);
        assert!(
            decoded
                .as_materialized_series()
                .equals_missing(original.as_materialized_series())
        );
    }

    #[test]
    fn test_missing_cell_gets_its_own_code() {
        let column = Series::new(
            "Sleep Disorder".into(),
            vec![Some("Insomnia"), None, Some("Sleep Apnea")],
        )
        .into_column();

        let (encoded, map) = encode_column(&column, EncodingOrder::FirstSeen);

        assert_eq!(encoded.null_count(), 0);
        assert_eq!(map.len(), 3);
        assert_eq!(encoded.get(1).unwrap(), AnyValue::Int64(1));
        let decoded = decode_column(&encoded, &map);
        assert!(
            decoded
                .as_materialized_series()
                .equals_missing(column.as_materialized_series())
        );
    }

    #[test]
    fn test_encode_skips_absent_columns() {
        let mut df = DataFrame::new(vec![gender_column()]).unwrap();
        let encodings = encode(&mut df, &["Gender", "Occupation"], EncodingOrder::FirstSeen).unwrap();
        assert_eq!(encodings.len(), 1);
        assert!(encodings.contains("Gender"));
        assert!(!encodings.contains("Occupation"));
        assert_eq!(df.column("Gender").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_numeric_column_encodes_by_string_form() {
        let column = Series::new("Stress Level".into(), vec![6i64, 8, 6]).into_column();
        let (encoded, map) = encode_column(&column, EncodingOrder::FirstSeen);
        assert_eq!(map.labels(), ["6", "8"]);
        assert_eq!(encoded.get(2).unwrap(), AnyValue::Int64(0));
    }
}
