use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sleep_analysis::{ColumnSummary, RegressionReport};
use sleep_common::format_numeric;

use crate::types::{ColumnSchema, CorrelationRow, RunOutcome};

pub fn print_run_summary(outcome: &RunOutcome) {
    println!("Dataset: {}", outcome.source.display());
    println!("Rows: {}  Columns: {}", outcome.rows, outcome.columns);
    if !outcome.encoded_columns.is_empty() {
        println!("Encoded: {}", outcome.encoded_columns.join(", "));
    }
    if let Some(path) = &outcome.mappings_out {
        println!("Encodings: {}", path.display());
    }
    if !outcome.correlations.is_empty() {
        println!();
        println!("Correlations:");
        println!("{}", correlation_table(&outcome.correlations));
    }
    if !outcome.regressions.is_empty() {
        println!();
        println!("Regressions:");
        println!("{}", regression_table(&outcome.regressions));
    }
    if !outcome.summaries.is_empty() {
        println!();
        println!("Summary statistics:");
        println!("{}", describe_table(&outcome.summaries));
    }
    if !outcome.charts.is_empty() {
        println!();
        println!(
            "Charts: {} written to {}",
            outcome.charts.len(),
            outcome.output_dir.display()
        );
    }
}

pub fn print_schema(columns: &[ColumnSchema]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Nulls"),
        header_cell("First value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for column in columns {
        table.add_row(vec![
            Cell::new(&column.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&column.dtype),
            count_cell(column.nulls),
            column
                .sample
                .as_ref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
}

fn correlation_table(rows: &[CorrelationRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("X"), header_cell("Y"), header_cell("r")]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.x),
            Cell::new(&row.y),
            number_cell(row.r, 3),
        ]);
    }
    table
}

fn regression_table(reports: &[RegressionReport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Predictor"),
        header_cell("Target"),
        header_cell("Slope"),
        header_cell("Intercept"),
        header_cell("MSE"),
        header_cell("R²"),
        header_cell("Train"),
        header_cell("Test"),
    ]);
    apply_table_style(&mut table);
    for index in 2..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for report in reports {
        table.add_row(vec![
            Cell::new(&report.predictor),
            Cell::new(&report.target),
            number_cell(report.slope, 4),
            number_cell(report.intercept, 4),
            number_cell(report.mean_squared_error, 4),
            number_cell(report.r_squared, 4),
            Cell::new(report.train_rows),
            Cell::new(report.test_rows),
        ]);
    }
    table
}

fn describe_table(summaries: &[ColumnSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Mean"),
        header_cell("Std"),
        header_cell("Min"),
        header_cell("25%"),
        header_cell("50%"),
        header_cell("75%"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    for index in 1..9 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.column),
            Cell::new(summary.count),
            number_cell(summary.mean, 2),
            number_cell(summary.std, 2),
            Cell::new(format_numeric(summary.min)),
            number_cell(summary.q25, 2),
            number_cell(summary.median, 2),
            number_cell(summary.q75, 2),
            Cell::new(format_numeric(summary.max)),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn number_cell(value: f64, decimals: usize) -> Cell {
    if value.is_nan() {
        dim_cell("nan")
    } else {
        Cell::new(format!("{value:.decimals$}"))
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
