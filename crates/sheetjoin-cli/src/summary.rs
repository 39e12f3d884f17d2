use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;
use sheetjoin_common::{column_names, column_values, format_numeric, render_value};
use sheetjoin_core::{FilterOutcome, IngestReport};
use sheetjoin_model::{AggregateResult, GroupedPoint};

use crate::types::{JoinResult, SummaryResult};

pub fn print_join(result: &JoinResult) -> Result<()> {
    print_ingest(&result.report);
    print_filters(&result.outcome);
    print_preview(&result.outcome.data, result.preview_rows)?;
    if result.exports.is_empty() {
        println!("No files written.");
    }
    for path in &result.exports {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

pub fn print_summary(result: &SummaryResult) {
    print_ingest(&result.report);
    print_filters(&result.outcome);
    print_aggregate(&result.aggregate);
}

pub fn print_summary_json(result: &SummaryResult) -> Result<()> {
    print_warnings(&result.report);
    let json = serde_json::to_string_pretty(&result.aggregate).context("serialize summary")?;
    println!("{json}");
    Ok(())
}

fn print_ingest(report: &IngestReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for file in &report.files {
        table.add_row(vec![
            Cell::new(&file.name),
            Cell::new(file.rows),
            Cell::new(file.columns),
        ]);
    }
    for failure in &report.failures {
        table.add_row(vec![
            Cell::new(&failure.file).fg(Color::Yellow),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.rows).add_attribute(Attribute::Bold),
        Cell::new(report.columns).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_warnings(report);
}

fn print_warnings(report: &IngestReport) {
    for warning in report.warnings() {
        eprintln!("warning: {warning}");
    }
}

fn print_filters(outcome: &FilterOutcome) {
    for spec in &outcome.applied {
        println!("Filter: {spec}");
    }
    for spec in &outcome.skipped {
        eprintln!("warning: filter {spec} skipped, column {} is missing", spec.column());
    }
    println!("Rows after filtering: {}", outcome.data.height());
}

fn print_preview(df: &DataFrame, rows: usize) -> Result<()> {
    if rows == 0 || df.width() == 0 {
        return Ok(());
    }
    let head = df.head(Some(rows));
    let mut columns = Vec::with_capacity(head.width());
    for column in head.get_columns() {
        columns.push(column_values(column).context("read preview cells")?);
    }
    let mut table = Table::new();
    table.set_header(column_names(&head).iter().map(|name| header_cell(name)));
    apply_table_style(&mut table);
    for row in 0..head.height() {
        table.add_row(columns.iter().map(|cells| {
            cells
                .get(row)
                .and_then(render_value)
                .map_or_else(|| dim_cell("-"), Cell::new)
        }));
    }
    println!();
    println!("Preview ({} of {} rows):", head.height(), df.height());
    println!("{table}");
    Ok(())
}

fn print_aggregate(aggregate: &AggregateResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows"), Cell::new(aggregate.row_count)]);
    table.add_row(vec![Cell::new("Columns"), Cell::new(aggregate.column_count)]);
    for entry in &aggregate.distinct_counts {
        table.add_row(vec![
            Cell::new(format!("Distinct {}", entry.column)),
            Cell::new(entry.count),
        ]);
    }
    if let Some(column) = &aggregate.amount_column {
        table.add_row(vec![
            Cell::new(format!("Total {column}")).add_attribute(Attribute::Bold),
            Cell::new(format_numeric(aggregate.amount_total)).add_attribute(Attribute::Bold),
        ]);
    }
    if aggregate.undated_rows > 0 {
        table.add_row(vec![
            Cell::new("Undated rows"),
            count_cell(aggregate.undated_rows, Color::Yellow),
        ]);
    }
    println!("{table}");

    print_series("Month", &aggregate.monthly);
    print_series("Category total", &aggregate.by_category);
    print_series("Category rows", &aggregate.category_counts);
}

fn print_series(label: &str, points: &[GroupedPoint]) {
    if points.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell(label), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for point in points {
        table.add_row(vec![
            Cell::new(&point.key),
            Cell::new(format_numeric(point.value)),
        ]);
    }
    println!();
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
