use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use sleep_analysis::{correlation, describe, linear_regression_with};
use sleep_chart::{ChartRenderer, ColumnLabels};
use sleep_cli::legends::{LegendSource, column_labels, labels_for};
use sleep_cli::plan::{AnalysisStep, ChartStep, RunPlan};
use sleep_common::{any_to_string, has_column};
use sleep_ingest::load_dataset;
use sleep_model::columns::{
    AGE, BMI_CATEGORY, BP_COLUMNS, GENDER, NUMERIC_COLUMNS, SLEEP_DISORDER, STUDY_PAIRS,
};
use sleep_model::{AppConfig, ChartFormat, Encodings};
use sleep_transform::{Preprocessed, preprocess_with};
use tracing::{info, info_span, warn};

use crate::cli::{ChartFormatArg, InspectArgs, RunArgs};
use crate::types::{ColumnSchema, CorrelationRow, RunOutcome};

pub fn run_pipeline(args: &RunArgs) -> Result<RunOutcome> {
    let config = load_config(args)?;
    let plan = RunPlan::select(args.run, args.viz, args.analysis);
    let run_span = info_span!("run", input = %args.input.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let Preprocessed { table, encodings } = preprocess_with(&args.input, &config.pipeline)
        .with_context(|| format!("preprocess {}", args.input.display()))?;

    let mappings_out = match &args.mappings_out {
        Some(path) => {
            write_mappings(path, &encodings)?;
            Some(path.clone())
        }
        None => None,
    };

    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        args.input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("charts")
    });
    let renderer = ChartRenderer::from_options(&output_dir, &config.charts);
    let legend_source = if args.static_legends {
        LegendSource::Static
    } else {
        LegendSource::Encoded
    };
    let labels = column_labels(&encodings, &config.charts.display_aliases, legend_source);

    let mut outcome = RunOutcome {
        source: args.input.clone(),
        rows: table.height(),
        columns: table.width(),
        encoded_columns: encodings.column_names().map(str::to_string).collect(),
        mappings_out,
        output_dir,
        charts: Vec::new(),
        correlations: Vec::new(),
        regressions: Vec::new(),
        summaries: Vec::new(),
    };

    for step in &plan.charts {
        let missing: Vec<&str> = step
            .required_columns()
            .iter()
            .copied()
            .filter(|name| !has_column(&table, name))
            .collect();
        if plan.skip_unavailable_charts && !missing.is_empty() {
            warn!(step = ?step, missing = ?missing, "chart skipped, columns absent");
            continue;
        }
        let written = info_span!("chart", step = ?step)
            .in_scope(|| {
                draw_charts(
                    &renderer,
                    &table,
                    *step,
                    &config.pipeline.categorical_columns,
                    &labels,
                )
            })
            .with_context(|| format!("draw {step:?} charts"))?;
        outcome.charts.extend(written);
    }
    for step in &plan.analyses {
        info_span!("analysis", step = ?step)
            .in_scope(|| run_analysis(&renderer, &table, *step, &config, &mut outcome))
            .with_context(|| format!("run {step:?} analysis"))?;
    }

    info!(
        charts = outcome.charts.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(outcome)
}

pub fn run_inspect(args: &InspectArgs) -> Result<Vec<ColumnSchema>> {
    let table = load_dataset(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    Ok(schema_of(&table))
}

fn load_config(args: &RunArgs) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path).context("load config")?,
        None => AppConfig::default(),
    };
    if let Some(format) = args.chart_format {
        config.charts.format = match format {
            ChartFormatArg::Svg => ChartFormat::Svg,
            ChartFormatArg::Png => ChartFormat::Png,
        };
    }
    Ok(config)
}

fn write_mappings(path: &Path, encodings: &Encodings) -> Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(encodings).context("serialize encodings")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), columns = encodings.len(), "encodings written");
    Ok(())
}

fn draw_charts(
    renderer: &ChartRenderer,
    table: &DataFrame,
    step: ChartStep,
    categorical_columns: &[String],
    labels: &ColumnLabels,
) -> Result<Vec<PathBuf>> {
    let paths = match step {
        ChartStep::Heatmap => vec![renderer.correlation_heatmap(table)?],
        ChartStep::Histograms => renderer.histograms(table, &NUMERIC_COLUMNS)?,
        ChartStep::BarCharts => {
            // Columns the encoder skipped are skipped here too.
            let present: Vec<&str> = categorical_columns
                .iter()
                .map(String::as_str)
                .filter(|name| has_column(table, name))
                .collect();
            renderer.bar_charts(table, present.as_slice(), labels)?
        }
        ChartStep::Scatter => {
            let mut paths = Vec::with_capacity(STUDY_PAIRS.len());
            for (idx, (x, y)) in STUDY_PAIRS.iter().enumerate() {
                let hue = (idx == 0).then_some(GENDER);
                paths.push(renderer.scatter(table, x, y, hue, labels)?);
            }
            paths
        }
        ChartStep::BpBoxplots => renderer.bp_boxplots(table, &BP_COLUMNS, BMI_CATEGORY, labels)?,
        ChartStep::BmiAndAge => vec![renderer.bmi_age_relationship(
            table,
            AGE,
            BMI_CATEGORY,
            &labels_for(labels, BMI_CATEGORY),
        )?],
        ChartStep::BmiAndSleep => vec![renderer.sleep_disorder_bmi(
            table,
            BMI_CATEGORY,
            SLEEP_DISORDER,
            &labels_for(labels, BMI_CATEGORY),
            &labels_for(labels, SLEEP_DISORDER),
        )?],
    };
    Ok(paths)
}

fn run_analysis(
    renderer: &ChartRenderer,
    table: &DataFrame,
    step: AnalysisStep,
    config: &AppConfig,
    outcome: &mut RunOutcome,
) -> Result<()> {
    match step {
        AnalysisStep::Correlation => {
            for (x, y) in STUDY_PAIRS {
                let r = correlation(table, x, y)?;
                info!(x, y, r, "correlation");
                outcome.correlations.push(CorrelationRow {
                    x: x.to_string(),
                    y: y.to_string(),
                    r,
                });
            }
        }
        AnalysisStep::ScatterRegression => {
            for (x, y) in STUDY_PAIRS {
                outcome.charts.push(renderer.regression_plot(table, x, y)?);
            }
        }
        AnalysisStep::Regression => {
            for (x, y) in STUDY_PAIRS {
                let report = linear_regression_with(table, x, y, &config.regression)?;
                outcome.regressions.push(report);
            }
        }
        AnalysisStep::Describe => {
            let mut columns: Vec<&str> = NUMERIC_COLUMNS.to_vec();
            columns.extend(BP_COLUMNS.into_iter().filter(|name| has_column(table, name)));
            outcome.summaries = describe(table, columns.as_slice())?;
        }
    }
    Ok(())
}

fn schema_of(table: &DataFrame) -> Vec<ColumnSchema> {
    table
        .get_columns()
        .iter()
        .map(|column| {
            let sample = (0..column.len()).find_map(|idx| {
                column
                    .get(idx)
                    .ok()
                    .filter(|value| !value.is_null())
                    .map(any_to_string)
            });
            ColumnSchema {
                name: column.name().to_string(),
                dtype: column.dtype().to_string(),
                nulls: column.null_count(),
                sample,
            }
        })
        .collect()
}
