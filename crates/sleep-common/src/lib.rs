//! Shared utilities for the sleep-health crates.
//!
//! This crate provides common helpers used across the workspace,
//! mostly conversions between Polars values and plain Rust values.

pub mod values;

pub use values::{
    any_to_f64, any_to_i64, any_to_string, column_f64_values, column_string_values, format_numeric,
    has_column, is_numeric_dtype, parse_f64, parse_i64,
};
