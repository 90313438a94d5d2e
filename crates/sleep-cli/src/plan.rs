//! Which analyses and charts a `run` invocation performs.

use clap::ValueEnum;
use sleep_model::columns::{AGE, BMI_CATEGORY, DIASTOLIC_BP, SLEEP_DISORDER, SYSTOLIC_BP};

/// Top-level part of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RunScope {
    #[default]
    All,
    Analysis,
    Visualization,
}

/// Chart selection for `--viz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VizSelection {
    #[default]
    All,
    Heatmap,
    Histograms,
    #[value(name = "bar_charts")]
    BarCharts,
    Scatter,
    #[value(name = "BMI_and_age")]
    BmiAndAge,
    #[value(name = "bp_boxplots")]
    BpBoxplots,
    #[value(name = "BMI_and_sleep")]
    BmiAndSleep,
}

/// Analysis selection for `--analysis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AnalysisSelection {
    #[default]
    All,
    Correlation,
    #[value(name = "scatter_regression")]
    ScatterRegression,
    Regression,
    Describe,
}

/// One chart family, in the order charts are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStep {
    Heatmap,
    Histograms,
    BarCharts,
    Scatter,
    BpBoxplots,
    BmiAndAge,
    BmiAndSleep,
}

impl ChartStep {
    /// Columns the family cannot be drawn without. Empty for families that
    /// adapt to whatever columns the table has.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Heatmap | Self::Histograms | Self::BarCharts | Self::Scatter => &[],
            Self::BpBoxplots => &[SYSTOLIC_BP, DIASTOLIC_BP, BMI_CATEGORY],
            Self::BmiAndAge => &[AGE, BMI_CATEGORY],
            Self::BmiAndSleep => &[BMI_CATEGORY, SLEEP_DISORDER],
        }
    }
}

/// One analysis, in the order analyses run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStep {
    Correlation,
    ScatterRegression,
    Regression,
    Describe,
}

const ALL_CHARTS: [ChartStep; 7] = [
    ChartStep::Heatmap,
    ChartStep::Histograms,
    ChartStep::BarCharts,
    ChartStep::Scatter,
    ChartStep::BpBoxplots,
    ChartStep::BmiAndAge,
    ChartStep::BmiAndSleep,
];

const ALL_ANALYSES: [AnalysisStep; 4] = [
    AnalysisStep::Correlation,
    AnalysisStep::ScatterRegression,
    AnalysisStep::Regression,
    AnalysisStep::Describe,
];

/// Ordered steps of one run. Charts come before analyses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunPlan {
    pub charts: Vec<ChartStep>,
    pub analyses: Vec<AnalysisStep>,
    /// Set when every chart family was requested: a family whose columns
    /// are absent is skipped instead of failing the run.
    pub skip_unavailable_charts: bool,
}

impl RunPlan {
    pub fn select(scope: RunScope, viz: VizSelection, analysis: AnalysisSelection) -> Self {
        let charts = match scope {
            RunScope::All | RunScope::Visualization => chart_steps(viz),
            RunScope::Analysis => Vec::new(),
        };
        let analyses = match scope {
            RunScope::All | RunScope::Analysis => analysis_steps(analysis),
            RunScope::Visualization => Vec::new(),
        };
        Self {
            charts,
            analyses,
            skip_unavailable_charts: viz == VizSelection::All,
        }
    }
}

fn chart_steps(viz: VizSelection) -> Vec<ChartStep> {
    let only = match viz {
        VizSelection::All => return ALL_CHARTS.to_vec(),
        VizSelection::Heatmap => ChartStep::Heatmap,
        VizSelection::Histograms => ChartStep::Histograms,
        VizSelection::BarCharts => ChartStep::BarCharts,
        VizSelection::Scatter => ChartStep::Scatter,
        VizSelection::BmiAndAge => ChartStep::BmiAndAge,
        VizSelection::BpBoxplots => ChartStep::BpBoxplots,
        VizSelection::BmiAndSleep => ChartStep::BmiAndSleep,
    };
    vec![only]
}

fn analysis_steps(analysis: AnalysisSelection) -> Vec<AnalysisStep> {
    let only = match analysis {
        AnalysisSelection::All => return ALL_ANALYSES.to_vec(),
        AnalysisSelection::Correlation => AnalysisStep::Correlation,
        AnalysisSelection::ScatterRegression => AnalysisStep::ScatterRegression,
        AnalysisSelection::Regression => AnalysisStep::Regression,
        AnalysisSelection::Describe => AnalysisStep::Describe,
    };
    vec![only]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_run_does_everything() {
        let plan = RunPlan::select(RunScope::All, VizSelection::All, AnalysisSelection::All);
        assert_eq!(plan.charts.len(), 7);
        assert_eq!(plan.analyses.len(), 4);
        assert!(plan.skip_unavailable_charts);
    }

    #[test]
    fn single_chart_family_must_be_drawable() {
        let plan = RunPlan::select(
            RunScope::Visualization,
            VizSelection::BpBoxplots,
            AnalysisSelection::All,
        );
        assert!(!plan.skip_unavailable_charts);
        assert_eq!(
            ChartStep::BpBoxplots.required_columns(),
            ["Systolic BP", "Diastolic BP", "BMI Category"]
        );
        assert!(ChartStep::Heatmap.required_columns().is_empty());
    }

    #[test]
    fn analysis_scope_ignores_viz_selection() {
        let plan = RunPlan::select(
            RunScope::Analysis,
            VizSelection::Heatmap,
            AnalysisSelection::Regression,
        );
        assert!(plan.charts.is_empty());
        assert_eq!(plan.analyses, [AnalysisStep::Regression]);
    }

    #[test]
    fn visualization_scope_runs_one_chart_family() {
        let plan = RunPlan::select(
            RunScope::Visualization,
            VizSelection::BmiAndSleep,
            AnalysisSelection::All,
        );
        assert_eq!(plan.charts, [ChartStep::BmiAndSleep]);
        assert!(plan.analyses.is_empty());
    }

    #[test]
    fn value_names_match_command_line_spelling() {
        let viz = VizSelection::from_str("BMI_and_age", false).unwrap();
        assert_eq!(viz, VizSelection::BmiAndAge);
        let analysis = AnalysisSelection::from_str("scatter_regression", false).unwrap();
        assert_eq!(analysis, AnalysisSelection::ScatterRegression);
    }
}
