//! End-to-end preprocessing: load, normalize, encode, split.

use std::path::Path;
use std::time::Instant;

use polars::prelude::DataFrame;
use sleep_common::has_column;
use sleep_ingest::load_dataset;
use sleep_model::{Encodings, PipelineConfig};
use tracing::{debug, info, info_span};

use crate::encode::encode;
use crate::error::{PipelineError, Stage};
use crate::normalize::normalize_labels;
use crate::split::split_compound;

/// Clean table plus the category maps needed to read its codes.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    pub table: DataFrame,
    pub encodings: Encodings,
}

/// Preprocess a CSV file with the default settings, encoding the given columns.
pub fn preprocess<S: AsRef<str>>(
    path: &Path,
    categorical_columns: &[S],
) -> Result<Preprocessed, PipelineError> {
    let config = PipelineConfig::default()
        .with_categorical_columns(categorical_columns.iter().map(|name| name.as_ref()));
    preprocess_with(path, &config)
}

/// Preprocess a CSV file with explicit settings.
pub fn preprocess_with(
    path: &Path,
    config: &PipelineConfig,
) -> Result<Preprocessed, PipelineError> {
    let source_file = path.display().to_string();
    let span = info_span!("preprocess", source_file = %source_file);
    let _guard = span.enter();
    let start = Instant::now();

    let table = info_span!("load").in_scope(|| load_dataset(path))?;
    let result = preprocess_frame(table, config)?;

    info!(
        source_file = %source_file,
        rows = result.table.height(),
        columns = result.table.width(),
        encoded = result.encodings.len(),
        duration_ms = start.elapsed().as_millis(),
        "preprocessing complete"
    );
    Ok(result)
}

/// Run the transformation stages on an already loaded table.
pub fn preprocess_frame(
    mut table: DataFrame,
    config: &PipelineConfig,
) -> Result<Preprocessed, PipelineError> {
    info_span!("normalize").in_scope(|| -> Result<(), PipelineError> {
        let start = Instant::now();
        let mut replaced = 0usize;
        for normalization in &config.normalizations {
            replaced += normalize_labels(&mut table, &normalization.column, &normalization.mapping)
                .map_err(PipelineError::at(Stage::Normalize))?;
        }
        info!(
            replaced,
            duration_ms = start.elapsed().as_millis(),
            "normalize complete"
        );
        Ok(())
    })?;

    let encodings = info_span!("encode").in_scope(|| -> Result<Encodings, PipelineError> {
        let start = Instant::now();
        let encodings = encode(
            &mut table,
            &config.categorical_columns,
            config.encoding_order,
        )
        .map_err(PipelineError::at(Stage::Encode))?;
        info!(
            columns = encodings.len(),
            duration_ms = start.elapsed().as_millis(),
            "encode complete"
        );
        Ok(encodings)
    })?;

    info_span!("split").in_scope(|| -> Result<(), PipelineError> {
        let start = Instant::now();
        let mut applied = 0usize;
        for split in &config.compound_splits {
            if !has_column(&table, &split.source_column) {
                debug!(column = %split.source_column, "split skipped, column absent");
                continue;
            }
            split_compound(&mut table, split).map_err(PipelineError::at(Stage::Split))?;
            applied += 1;
        }
        info!(
            applied,
            duration_ms = start.elapsed().as_millis(),
            "split complete"
        );
        Ok(())
    })?;

    Ok(Preprocessed { table, encodings })
}
