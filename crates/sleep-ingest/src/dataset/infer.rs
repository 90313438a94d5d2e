//! Per-column type inference.
//!
//! A column is integer if every non-empty cell parses as `i64`, float if every
//! non-empty cell parses as a finite `f64`, and text otherwise. Empty cells
//! become nulls and do not vote. A column with no values at all is text.

use polars::prelude::{Column, IntoColumn, NamedFrom, Series};
use sleep_common::{parse_f64, parse_i64};

/// Inferred storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

/// Decide the kind of a column from its raw cells.
pub fn infer_kind(values: &[String]) -> ColumnKind {
    let mut present = values.iter().filter(|value| !value.is_empty()).peekable();
    if present.peek().is_none() {
        return ColumnKind::Text;
    }
    let mut kind = ColumnKind::Integer;
    for value in present {
        if kind == ColumnKind::Integer && parse_i64(value).is_none() {
            kind = ColumnKind::Float;
        }
        if kind == ColumnKind::Float && parse_f64(value).is_none() {
            return ColumnKind::Text;
        }
    }
    kind
}

/// Build a typed column from trimmed raw cells.
pub fn infer_column(name: &str, values: &[String]) -> Column {
    let series = match infer_kind(values) {
        ColumnKind::Integer => {
            let parsed: Vec<Option<i64>> = values.iter().map(|value| parse_i64(value)).collect();
            Series::new(name.into(), parsed)
        }
        ColumnKind::Float => {
            let parsed: Vec<Option<f64>> = values.iter().map(|value| parse_f64(value)).collect();
            Series::new(name.into(), parsed)
        }
        ColumnKind::Text => {
            let text: Vec<Option<&str>> = values
                .iter()
                .map(|value| (!value.is_empty()).then_some(value.as_str()))
                .collect();
            Series::new(name.into(), text)
        }
    };
    series.into_column()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn integers_stay_integers() {
        assert_eq!(infer_kind(&cells(&["27", "28", ""])), ColumnKind::Integer);
    }

    #[test]
    fn one_decimal_makes_a_float_column() {
        assert_eq!(infer_kind(&cells(&["6", "6.1", "7.8"])), ColumnKind::Float);
    }

    #[test]
    fn any_text_makes_a_text_column() {
        assert_eq!(infer_kind(&cells(&["126/83", "125/80"])), ColumnKind::Text);
        assert_eq!(infer_kind(&cells(&["6.1", "None"])), ColumnKind::Text);
    }

    #[test]
    fn all_empty_is_text() {
        assert_eq!(infer_kind(&cells(&["", ""])), ColumnKind::Text);
        assert_eq!(infer_kind(&[]), ColumnKind::Text);
    }

    #[test]
    fn empty_cells_become_nulls() {
        let column = infer_column("Heart Rate", &cells(&["77", "", "75"]));
        assert_eq!(column.dtype(), &DataType::Int64);
        assert_eq!(column.null_count(), 1);

        let text = infer_column("Occupation", &cells(&["Nurse", ""]));
        assert_eq!(text.dtype(), &DataType::String);
        assert_eq!(text.null_count(), 1);
    }
}
