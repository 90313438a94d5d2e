//! Configuration for preprocessing, analysis and chart rendering.
//!
//! Every field has a default matching the sleep health dataset, so an
//! empty TOML file (or no file at all) gives the standard run. A config
//! file only needs the keys it changes:
//!
//! ```toml
//! [pipeline]
//! encoding_order = "sorted"
//!
//! [regression]
//! seed = 7
//!
//! [charts]
//! format = "png"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::EncodingOrder;
use crate::columns::{BLOOD_PRESSURE, BMI_CATEGORY, CATEGORICAL_COLUMNS, DIASTOLIC_BP, SYSTOLIC_BP};
use crate::error::{ModelError, Result};

/// Canonicalization applied to one column before encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelNormalization {
    /// Column whose labels are rewritten.
    pub column: String,
    /// Raw label -> canonical label.
    pub mapping: BTreeMap<String, String>,
}

impl LabelNormalization {
    /// `BMI Category`: `"Normal Weight"` collapses into `"Normal"`.
    pub fn bmi_category() -> Self {
        Self {
            column: BMI_CATEGORY.to_string(),
            mapping: BTreeMap::from([("Normal Weight".to_string(), "Normal".to_string())]),
        }
    }
}

/// Target type of one part of a compound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartType {
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// Trimmed text.
    Text,
}

/// One output column of a compound split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundPart {
    pub name: String,
    #[serde(rename = "type")]
    pub part_type: PartType,
}

impl CompoundPart {
    pub fn new(name: impl Into<String>, part_type: PartType) -> Self {
        Self {
            name: name.into(),
            part_type,
        }
    }
}

/// Derivation of several typed columns from one delimited string column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundSplit {
    /// Column holding the compound values; removed after a successful split.
    pub source_column: String,
    /// Separator between parts.
    pub separator: String,
    /// Output columns in part order.
    pub parts: Vec<CompoundPart>,
}

impl CompoundSplit {
    /// `Blood Pressure` `"120/80"` -> `Systolic BP` 120, `Diastolic BP` 80.
    pub fn blood_pressure() -> Self {
        Self {
            source_column: BLOOD_PRESSURE.to_string(),
            separator: "/".to_string(),
            parts: vec![
                CompoundPart::new(SYSTOLIC_BP, PartType::Int),
                CompoundPart::new(DIASTOLIC_BP, PartType::Int),
            ],
        }
    }
}

/// Preprocessing pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Columns to encode, in order. Absent columns are skipped with a warning.
    pub categorical_columns: Vec<String>,
    /// Label canonicalization applied before encoding.
    pub normalizations: Vec<LabelNormalization>,
    /// How codes are assigned to labels.
    pub encoding_order: EncodingOrder,
    /// Compound columns split after encoding.
    pub compound_splits: Vec<CompoundSplit>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            categorical_columns: CATEGORICAL_COLUMNS.iter().map(ToString::to_string).collect(),
            normalizations: vec![LabelNormalization::bmi_category()],
            encoding_order: EncodingOrder::default(),
            compound_splits: vec![CompoundSplit::blood_pressure()],
        }
    }
}

impl PipelineConfig {
    /// Default settings with a different list of columns to encode.
    pub fn with_categorical_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_encoding_order(mut self, order: EncodingOrder) -> Self {
        self.encoding_order = order;
        self
    }
}

/// Train/test partition settings for linear regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionOptions {
    /// Share of rows held out for evaluation, in `(0, 1)`.
    pub test_fraction: f64,
    /// Seed of the row shuffle; fixed so reports are reproducible.
    pub seed: u64,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Chart file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    #[default]
    Svg,
    Png,
}

impl ChartFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::Png => "png",
        }
    }
}

/// Chart rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub format: ChartFormat,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Raw label -> legend text, applied when legends come from encoder maps.
    pub display_aliases: BTreeMap<String, String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            format: ChartFormat::default(),
            width: 800,
            height: 600,
            display_aliases: BTreeMap::from([
                ("None".to_string(), "No Disorder".to_string()),
                ("Sleep Apnea".to_string(), "Apnea".to_string()),
            ]),
        }
    }
}

/// Complete configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub regression: RegressionOptions,
    pub charts: ChartOptions,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ModelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        parse_toml(&contents, path)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        parse_toml(contents, Path::new("<inline>"))
    }
}

fn parse_toml(contents: &str, origin: &Path) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|err| ModelError::ConfigParse {
        path: origin.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_dataset_defaults() {
        let config = AppConfig::from_toml_str("").expect("parse empty config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.pipeline.categorical_columns,
            ["Gender", "Occupation", "BMI Category", "Sleep Disorder"]
        );
        assert_eq!(config.pipeline.compound_splits[0].source_column, "Blood Pressure");
        assert_eq!(config.regression.seed, 42);
    }

    #[test]
    fn partial_config_overrides_only_named_keys() {
        let config = AppConfig::from_toml_str(
            r#"
            [pipeline]
            encoding_order = "sorted"

            [charts]
            format = "png"
            width = 1024
            "#,
        )
        .expect("parse config");
        assert_eq!(config.pipeline.encoding_order, EncodingOrder::Sorted);
        assert_eq!(config.pipeline.normalizations.len(), 1);
        assert_eq!(config.charts.format, ChartFormat::Png);
        assert_eq!(config.charts.width, 1024);
        assert_eq!(config.charts.height, 600);
    }

    #[test]
    fn compound_split_parts_parse_from_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [[pipeline.compound_splits]]
            source_column = "Blood Pressure"
            separator = "/"
            parts = [
                { name = "Systolic BP", type = "int" },
                { name = "Diastolic BP", type = "float" },
            ]
            "#,
        )
        .expect("parse config");
        let split = &config.pipeline.compound_splits[0];
        assert_eq!(split.parts[1].part_type, PartType::Float);
    }

    #[test]
    fn invalid_config_reports_parse_error() {
        let err = AppConfig::from_toml_str("[pipeline]\nencoding_order = \"random\"")
            .expect_err("reject unknown order");
        assert!(matches!(err, ModelError::ConfigParse { .. }));
    }
}
