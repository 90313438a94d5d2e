//! Chart rendering.
//!
//! [`ChartRenderer`] draws one chart per call into its output directory and
//! returns the path it wrote. Every method takes the clean table by shared
//! reference; display labels are applied to a private copy.

use std::collections::BTreeMap;
use std::path::PathBuf;

use polars::prelude::{Column, DataFrame};
use sleep_analysis::{correlation_matrix, fit_line};
use sleep_common::{column_f64_values, column_string_values, has_column, is_numeric_dtype};
use sleep_model::{ChartFormat, ChartOptions, CodeLabels};
use tracing::info;

use crate::data::{
    BoxStats, HISTOGRAM_BINS, ProportionTable, age_group, box_stats, histogram, proportions, value_counts,
};
use crate::error::{ChartError, Result};
use crate::layout::{
    Margins, PlotArea, draw_band_axis, draw_legend, draw_title, draw_x_axis, draw_y_axis,
};
use crate::output::{slug, write_chart};
use crate::palette::{MISSING, category_color, coolwarm, series_color};
use crate::relabel::{ColumnLabels, relabel_codes};
use crate::scale::{extent, padded_domain};
use crate::svg::{Anchor, SvgDocument, TextStyle};

const POINT_RADIUS: f64 = 3.5;
const FIT_COLOR: &str = "#d62728";

/// Writes chart files into one output directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_dir: PathBuf,
    format: ChartFormat,
    width: u32,
    height: u32,
}

impl ChartRenderer {
    /// SVG charts of 800x600 pixels in `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            format: ChartFormat::default(),
            width: 800,
            height: 600,
        }
    }

    /// Renderer using the format and size of `options`.
    pub fn from_options(output_dir: impl Into<PathBuf>, options: &ChartOptions) -> Self {
        Self::new(output_dir)
            .with_format(options.format)
            .with_size(options.width, options.height)
    }

    pub fn with_format(mut self, format: ChartFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(100);
        self.height = height.max(100);
        self
    }

    fn canvas(&self, title: &str) -> Result<SvgDocument> {
        let mut doc = SvgDocument::new(self.width, self.height)?;
        draw_title(&mut doc, title)?;
        Ok(doc)
    }

    fn area(&self, margins: Margins) -> PlotArea {
        PlotArea::new(f64::from(self.width), f64::from(self.height), margins)
    }

    fn save(&self, name: &str, doc: SvgDocument) -> Result<PathBuf> {
        let svg = doc.finish()?;
        let path = write_chart(&self.output_dir, name, &svg, self.format)?;
        info!(chart = name, path = %path.display(), "chart written");
        Ok(path)
    }

    // === Correlation ===

    /// Annotated heatmap of the pairwise correlations of all numeric columns.
    pub fn correlation_heatmap(&self, df: &DataFrame) -> Result<PathBuf> {
        let matrix = correlation_matrix(df);
        let mut doc = self.canvas("Correlation Matrix")?;
        let area = self.area(Margins {
            left: 150.0,
            right: 100.0,
            top: 50.0,
            bottom: 130.0,
        });

        let n = matrix.len();
        if n > 0 {
            let cell_w = area.width / n as f64;
            let cell_h = area.height / n as f64;
            for (i, row) in matrix.values().iter().enumerate() {
                for (j, r) in row.iter().enumerate() {
                    let x = area.left + cell_w * j as f64;
                    let y = area.top + cell_h * i as f64;
                    let (fill, text) = if r.is_nan() {
                        (MISSING.hex(), "nan".to_string())
                    } else {
                        (coolwarm((r + 1.0) / 2.0).hex(), format!("{r:.2}"))
                    };
                    doc.rect(x, y, cell_w, cell_h, &fill, Some("white"))?;
                    doc.text(
                        x + cell_w / 2.0,
                        y + cell_h / 2.0 + 4.0,
                        &text,
                        &TextStyle::small().anchor(Anchor::Middle),
                    )?;
                }
            }
            for (idx, name) in matrix.columns().iter().enumerate() {
                let y = area.top + cell_h * (idx as f64 + 0.5) + 4.0;
                doc.text(area.left - 6.0, y, name, &TextStyle::small().anchor(Anchor::End))?;
                let x = area.left + cell_w * (idx as f64 + 0.5);
                doc.text(
                    x,
                    area.bottom() + 14.0,
                    name,
                    &TextStyle::small().anchor(Anchor::End).rotate(-45.0),
                )?;
            }
        }

        // Colour bar from -1 (bottom) to 1 (top).
        let bar_x = area.right() + 30.0;
        let steps: u32 = 20;
        let step_h = area.height / f64::from(steps);
        for step in 0..steps {
            let t = 1.0 - (f64::from(step) + 0.5) / f64::from(steps);
            let y = area.top + step_h * f64::from(step);
            doc.rect(bar_x, y, 18.0, step_h + 0.5, &coolwarm(t).hex(), None)?;
        }
        for (value, y) in [(1.0, area.top), (0.0, area.top + area.height / 2.0), (-1.0, area.bottom())] {
            doc.text(bar_x + 24.0, y + 4.0, &format!("{value:.1}"), &TextStyle::small())?;
        }

        self.save("correlation_heatmap", doc)
    }

    // === Distributions ===

    /// One histogram (20 bins) per numeric column.
    pub fn histograms<S: AsRef<str>>(&self, df: &DataFrame, columns: &[S]) -> Result<Vec<PathBuf>> {
        columns
            .iter()
            .map(|column| self.histogram_chart(df, column.as_ref()))
            .collect()
    }

    fn histogram_chart(&self, df: &DataFrame, column: &str) -> Result<PathBuf> {
        let values: Vec<f64> = numeric_values(df, column)?.into_iter().flatten().collect();
        let hist = histogram(&values, HISTOGRAM_BINS);
        let mut doc = self.canvas(&format!("Distribution of {column}"))?;
        let area = self.area(Margins::STANDARD);

        let first = hist.edges.first().copied().unwrap_or(0.0);
        let last = hist.edges.last().copied().unwrap_or(1.0);
        let x = area.x_scale((first, last));
        let max_count = hist.counts.iter().copied().max().unwrap_or(0).max(1);
        let y = area.y_scale((0.0, max_count as f64 * 1.05));

        draw_y_axis(&mut doc, &area, &y, "Frequency")?;
        for (idx, count) in hist.counts.iter().enumerate() {
            let x0 = x.map(hist.edges[idx]);
            let x1 = x.map(hist.edges[idx + 1]);
            let top = y.map(*count as f64);
            doc.rect(x0, top, x1 - x0, area.bottom() - top, series_color(0), Some("white"))?;
        }
        draw_x_axis(&mut doc, &area, &x, column)?;

        self.save(&format!("histogram_{}", slug(column)), doc)
    }

    /// One frequency bar chart per column, most frequent value first.
    ///
    /// Columns with an entry in `labels` are shown with display labels.
    pub fn bar_charts<S: AsRef<str>>(
        &self,
        df: &DataFrame,
        columns: &[S],
        labels: &ColumnLabels,
    ) -> Result<Vec<PathBuf>> {
        columns
            .iter()
            .map(|column| self.bar_chart(df, column.as_ref(), labels.get(column.as_ref())))
            .collect()
    }

    fn bar_chart(&self, df: &DataFrame, column: &str, labels: Option<&CodeLabels>) -> Result<PathBuf> {
        let values = display_column(df, column, labels)?;
        let counts = value_counts(&values);
        let mut doc = self.canvas(&format!("Frequency of {column}"))?;
        let area = self.area(Margins {
            bottom: 100.0,
            ..Margins::STANDARD
        });

        let max_count = counts.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1);
        let y = area.y_scale((0.0, max_count as f64 * 1.1));
        draw_y_axis(&mut doc, &area, &y, "Count")?;

        let band = area.band_width(counts.len());
        for (idx, (_, count)) in counts.iter().enumerate() {
            let center = area.band_center(idx, counts.len());
            let top = y.map(*count as f64);
            doc.rect(
                center - band * 0.4,
                top,
                band * 0.8,
                area.bottom() - top,
                category_color(idx),
                None,
            )?;
            doc.text(
                center,
                top - 4.0,
                &count.to_string(),
                &TextStyle::small().anchor(Anchor::Middle),
            )?;
        }
        let names: Vec<String> = counts.into_iter().map(|(name, _)| name).collect();
        draw_band_axis(&mut doc, &area, &names, column)?;

        self.save(&format!("bar_{}", slug(column)), doc)
    }

    // === Relationships ===

    /// Scatter plot of `y` against `x`, coloured by `hue` when given.
    pub fn scatter(
        &self,
        df: &DataFrame,
        x: &str,
        y: &str,
        hue: Option<&str>,
        labels: &ColumnLabels,
    ) -> Result<PathBuf> {
        let xs = numeric_values(df, x)?;
        let ys = numeric_values(df, y)?;
        let hues = match hue {
            Some(column) => Some(display_column(df, column, labels.get(column))?),
            None => None,
        };

        // Points per hue group; `None` hue plots everything in one colour.
        let mut groups: BTreeMap<String, Vec<(f64, f64)>> = BTreeMap::new();
        for (idx, pair) in xs.iter().zip(&ys).enumerate() {
            let (Some(px), Some(py)) = pair else { continue };
            let group = match &hues {
                Some(values) => match &values[idx] {
                    Some(label) => label.clone(),
                    None => continue,
                },
                None => String::new(),
            };
            groups.entry(group).or_default().push((*px, *py));
        }

        let title = format!("{y} vs {x}");
        let mut doc = self.canvas(&title)?;
        let margins = if hue.is_some() {
            Margins::WITH_LEGEND
        } else {
            Margins::STANDARD
        };
        let area = self.area(margins);
        let points = groups.values().flatten();
        let x_scale = area.x_scale(domain_of(points.clone().map(|p| p.0)));
        let y_scale = area.y_scale(domain_of(points.map(|p| p.1)));

        draw_y_axis(&mut doc, &area, &y_scale, y)?;
        draw_x_axis(&mut doc, &area, &x_scale, x)?;
        let mut legend = Vec::with_capacity(groups.len());
        for (idx, (group, points)) in groups.iter().enumerate() {
            let color = series_color(idx);
            for (px, py) in points {
                doc.circle(x_scale.map(*px), y_scale.map(*py), POINT_RADIUS, color, 0.7)?;
            }
            legend.push((group.clone(), color));
        }
        if let Some(hue) = hue {
            draw_legend(&mut doc, area.right() + 20.0, area.top + 10.0, hue, &legend)?;
        }

        self.save(&format!("scatter_{}_vs_{}", slug(x), slug(y)), doc)
    }

    /// Scatter plot of `y` against `x` with the least-squares line.
    pub fn regression_plot(&self, df: &DataFrame, x: &str, y: &str) -> Result<PathBuf> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = numeric_values(df, x)?
            .into_iter()
            .zip(numeric_values(df, y)?)
            .filter_map(|pair| match pair {
                (Some(px), Some(py)) => Some((px, py)),
                _ => None,
            })
            .unzip();
        let fit = fit_line(&xs, &ys)?;

        let mut doc = self.canvas(&format!("Regression of {y} on {x}"))?;
        let area = self.area(Margins::STANDARD);
        let x_domain = domain_of(xs.iter().copied());
        let x_scale = area.x_scale(x_domain);
        let fitted_ends = [fit.predict(x_domain.0), fit.predict(x_domain.1)];
        let y_scale = area.y_scale(domain_of(ys.iter().copied().chain(fitted_ends)));

        draw_y_axis(&mut doc, &area, &y_scale, y)?;
        draw_x_axis(&mut doc, &area, &x_scale, x)?;
        for (px, py) in xs.iter().zip(&ys) {
            doc.circle(x_scale.map(*px), y_scale.map(*py), POINT_RADIUS, series_color(0), 0.6)?;
        }
        doc.line(
            x_scale.map(x_domain.0),
            y_scale.map(fitted_ends[0]),
            x_scale.map(x_domain.1),
            y_scale.map(fitted_ends[1]),
            FIT_COLOR,
            2.0,
        )?;
        let equation = format!("y = {:.3}x + {:.3}", fit.slope, fit.intercept);
        doc.text(area.left + 10.0, area.top + 16.0, &equation, &TextStyle::small())?;

        self.save(&format!("regression_{}_vs_{}", slug(x), slug(y)), doc)
    }

    // === Group comparisons ===

    /// One box plot per blood-pressure column, one box per `group_col` value.
    pub fn bp_boxplots<S: AsRef<str>>(
        &self,
        df: &DataFrame,
        bp_columns: &[S],
        group_col: &str,
        labels: &ColumnLabels,
    ) -> Result<Vec<PathBuf>> {
        let groups = display_column(df, group_col, labels.get(group_col))?;
        bp_columns
            .iter()
            .map(|column| self.boxplot(df, column.as_ref(), group_col, &groups))
            .collect()
    }

    fn boxplot(
        &self,
        df: &DataFrame,
        column: &str,
        group_col: &str,
        groups: &[Option<String>],
    ) -> Result<PathBuf> {
        let values = numeric_values(df, column)?;
        let mut grouped: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (value, group) in values.iter().zip(groups) {
            if let (Some(value), Some(group)) = (value, group) {
                grouped.entry(group.clone()).or_default().push(*value);
            }
        }
        let boxes: Vec<(String, BoxStats)> = grouped
            .into_iter()
            .filter_map(|(group, values)| box_stats(&values).map(|stats| (group, stats)))
            .collect();

        let mut doc = self.canvas(&format!("{column} by {group_col}"))?;
        let area = self.area(Margins::STANDARD);
        let all = boxes.iter().flat_map(|(_, stats)| {
            [stats.whisker_low, stats.whisker_high]
                .into_iter()
                .chain(stats.outliers.iter().copied())
        });
        let y = area.y_scale(domain_of(all));
        draw_y_axis(&mut doc, &area, &y, column)?;

        let band = area.band_width(boxes.len());
        for (idx, (_, stats)) in boxes.iter().enumerate() {
            let center = area.band_center(idx, boxes.len());
            let half = band * 0.3;
            let color = series_color(idx);
            doc.line(center, y.map(stats.whisker_low), center, y.map(stats.q1), "#333333", 1.0)?;
            doc.line(center, y.map(stats.q3), center, y.map(stats.whisker_high), "#333333", 1.0)?;
            for whisker in [stats.whisker_low, stats.whisker_high] {
                let wy = y.map(whisker);
                doc.line(center - half / 2.0, wy, center + half / 2.0, wy, "#333333", 1.0)?;
            }
            let top = y.map(stats.q3);
            doc.rect(center - half, top, half * 2.0, y.map(stats.q1) - top, color, Some("#333333"))?;
            let my = y.map(stats.median);
            doc.line(center - half, my, center + half, my, "#333333", 2.0)?;
            for outlier in &stats.outliers {
                doc.circle(center, y.map(*outlier), 2.5, "#333333", 0.8)?;
            }
        }
        let names: Vec<String> = boxes.into_iter().map(|(name, _)| name).collect();
        draw_band_axis(&mut doc, &area, &names, group_col)?;

        self.save(&format!("boxplot_{}", slug(column)), doc)
    }

    /// Share of each BMI category within each age group (27-34, 35-42,
    /// 43-50, 51-59). Rows outside every group or missing BMI are dropped.
    pub fn bmi_age_relationship(
        &self,
        df: &DataFrame,
        age_col: &str,
        bmi_col: &str,
        bmi_labels: &CodeLabels,
    ) -> Result<PathBuf> {
        let ages = numeric_values(df, age_col)?;
        let bmi = display_column(df, bmi_col, Some(bmi_labels))?;
        let pairs: Vec<(String, String)> = ages
            .iter()
            .zip(&bmi)
            .filter_map(|(age, bmi)| {
                let group = age_group((*age)?)?;
                Some((group.to_string(), bmi.clone()?))
            })
            .collect();
        let table = proportions(&pairs);
        self.stacked_chart(
            "Proportion of BMI Categories by Age Group",
            "Age Group",
            bmi_col,
            &table,
            "bmi_by_age_group",
        )
    }

    /// Share of each BMI category within each sleep disorder group.
    ///
    /// Rows missing either value are dropped.
    pub fn sleep_disorder_bmi(
        &self,
        df: &DataFrame,
        bmi_col: &str,
        disorder_col: &str,
        bmi_labels: &CodeLabels,
        disorder_labels: &CodeLabels,
    ) -> Result<PathBuf> {
        let bmi = display_column(df, bmi_col, Some(bmi_labels))?;
        let disorder = display_column(df, disorder_col, Some(disorder_labels))?;
        let pairs: Vec<(String, String)> = disorder
            .into_iter()
            .zip(bmi)
            .filter_map(|pair| match pair {
                (Some(group), Some(category)) => Some((group, category)),
                _ => None,
            })
            .collect();
        let table = proportions(&pairs);
        self.stacked_chart(
            "Proportion of BMI Categories by Sleep Disorder",
            disorder_col,
            bmi_col,
            &table,
            "bmi_by_sleep_disorder",
        )
    }

    fn stacked_chart(
        &self,
        title: &str,
        x_label: &str,
        legend_title: &str,
        table: &ProportionTable,
        name: &str,
    ) -> Result<PathBuf> {
        let mut doc = self.canvas(title)?;
        let area = self.area(Margins::WITH_LEGEND);
        let y = area.y_scale((0.0, 1.0));
        draw_y_axis(&mut doc, &area, &y, "Proportion")?;

        let band = area.band_width(table.groups.len());
        for (g, shares) in table.shares.iter().enumerate() {
            let center = area.band_center(g, table.groups.len());
            let mut base = 0.0;
            for (c, share) in shares.iter().enumerate() {
                let top = y.map(base + share);
                let bottom = y.map(base);
                doc.rect(
                    center - band * 0.35,
                    top,
                    band * 0.7,
                    bottom - top,
                    category_color(c),
                    Some("white"),
                )?;
                base += share;
            }
        }
        draw_band_axis(&mut doc, &area, &table.groups, x_label)?;
        let legend: Vec<(String, &str)> = table
            .categories
            .iter()
            .enumerate()
            .map(|(c, category)| (category.clone(), category_color(c)))
            .collect();
        draw_legend(&mut doc, area.right() + 20.0, area.top + 10.0, legend_title, &legend)?;

        self.save(name, doc)
    }
}

fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    if !has_column(df, name) {
        return Err(ChartError::ColumnNotFound {
            column: name.to_string(),
        });
    }
    Ok(df.column(name)?)
}

fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = require_column(df, name)?;
    if !is_numeric_dtype(column.dtype()) {
        return Err(ChartError::NonNumericColumn {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        });
    }
    Ok(column_f64_values(column))
}

/// Display text of a column, read from a relabeled copy of the table.
fn display_column(
    df: &DataFrame,
    name: &str,
    labels: Option<&CodeLabels>,
) -> Result<Vec<Option<String>>> {
    require_column(df, name)?;
    let Some(labels) = labels else {
        return Ok(column_string_values(df.column(name)?));
    };
    let relabeled = relabel_codes(df, [(name, labels)])?;
    Ok(column_string_values(relabeled.column(name)?))
}

fn domain_of<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    extent(values).map_or((0.0, 1.0), |(min, max)| padded_domain(min, max))
}
