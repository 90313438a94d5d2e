//! CLI argument definitions for `sleep-health`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sleep_cli::plan::{AnalysisSelection, RunScope, VizSelection};

#[derive(Parser)]
#[command(
    name = "sleep-health",
    version,
    about = "Sleep health and lifestyle analysis",
    long_about = "Preprocess the sleep health and lifestyle dataset, then compute\n\
                  correlations, regressions and summary statistics and draw charts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Preprocess a dataset and run the selected analyses and charts.
    Run(RunArgs),

    /// Print the inferred column types of a dataset without preprocessing it.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the dataset CSV file.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Which part of the program to run.
    #[arg(long = "run", value_enum, default_value = "all")]
    pub run: RunScope,

    /// Which charts to draw.
    #[arg(long = "viz", value_enum, default_value = "all")]
    pub viz: VizSelection,

    /// Which analyses to run.
    #[arg(long = "analysis", value_enum, default_value = "all")]
    pub analysis: AnalysisSelection,

    /// Directory for chart files (default: `charts` next to the CSV file).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Chart file format (overrides the config file).
    #[arg(long = "chart-format", value_enum)]
    pub chart_format: Option<ChartFormatArg>,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the category encodings as JSON.
    #[arg(long = "mappings-out", value_name = "FILE")]
    pub mappings_out: Option<PathBuf>,

    /// Use the fixed BMI and sleep-disorder legends instead of the encoder's labels.
    #[arg(long = "static-legends")]
    pub static_legends: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Path to the dataset CSV file.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ChartFormatArg {
    Svg,
    Png,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
