//! Aggregation of a (filtered) record table.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use polars::prelude::DataFrame;
use sheetjoin_common::{column_values, find_column, parse_f64, render_value};
use sheetjoin_model::{AggregateResult, DistinctCount, GroupedPoint, SummaryOptions, Value};
use tracing::{debug, info, info_span};

use crate::error::Result;

/// Calendar-month group key, `YYYY-MM`.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Summarizes a table.
///
/// - Distinct counts cover configured columns present in the table; absent
///   cells are not counted.
/// - The amount total is zero when the amount column is missing or the table
///   is empty. Numeric text counts as a number; other text and absent cells
///   contribute nothing.
/// - The monthly series needs both the date and the amount column. Rows with
///   no date are left out of it and counted in `undated_rows`.
/// - Category rollups need the category column; rows with no category are
///   left out. Series are ordered by descending value, then key.
pub fn summarize(df: &DataFrame, options: &SummaryOptions) -> Result<AggregateResult> {
    let span = info_span!("summarize", rows = df.height(), columns = df.width());
    let _guard = span.enter();

    let mut result = AggregateResult {
        row_count: df.height(),
        column_count: df.width(),
        amount_column: options.amount_column.clone(),
        ..AggregateResult::default()
    };

    for name in &options.distinct_columns {
        let Some(column) = find_column(df, name) else {
            debug!(column = %name, "distinct column not present");
            continue;
        };
        let distinct: HashSet<String> = column_values(column)?
            .iter()
            .filter_map(render_value)
            .collect();
        result.distinct_counts.push(DistinctCount {
            column: name.clone(),
            count: distinct.len(),
        });
    }

    let amounts: Option<Vec<Option<f64>>> = match options.amount_column.as_deref() {
        Some(name) => match find_column(df, name) {
            Some(column) => {
                let cells = column_values(column)?;
                let amounts: Vec<Option<f64>> = cells.iter().map(amount_value).collect();
                let unreadable = cells
                    .iter()
                    .zip(&amounts)
                    .filter(|(cell, amount)| amount.is_none() && !cell.is_absent())
                    .count();
                if unreadable > 0 {
                    debug!(column = %name, unreadable, "non-numeric amounts ignored");
                }
                Some(amounts)
            }
            None => {
                debug!(column = %name, "amount column not present");
                None
            }
        },
        None => None,
    };
    if let Some(amounts) = &amounts {
        result.amount_total = amounts.iter().flatten().fold(0.0, |acc, v| acc + v);
    }

    let dates = options
        .date_column
        .as_deref()
        .and_then(|name| find_column(df, name));
    if let (Some(amounts), Some(dates)) = (&amounts, dates) {
        // Keyed by the first day of the month so the series sorts by date.
        let mut months: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (date, amount) in column_values(dates)?.iter().zip(amounts) {
            match date.as_date() {
                Some(date) => {
                    let month = date.with_day(1).unwrap_or(date);
                    *months.entry(month).or_insert(0.0) += amount.unwrap_or(0.0);
                }
                None => result.undated_rows += 1,
            }
        }
        result.monthly = months
            .into_iter()
            .map(|(month, value)| GroupedPoint::new(month_key(month), value))
            .collect();
    }

    if let Some(name) = options.category_column.as_deref() {
        match find_column(df, name) {
            Some(column) => {
                let categories = column_values(column)?;
                let mut sums: BTreeMap<String, f64> = BTreeMap::new();
                let mut counts: BTreeMap<String, f64> = BTreeMap::new();
                for (idx, category) in categories.iter().enumerate() {
                    let Some(key) = render_value(category) else {
                        continue;
                    };
                    *counts.entry(key.clone()).or_default() += 1.0;
                    if let Some(amounts) = &amounts {
                        *sums.entry(key).or_insert(0.0) += amounts[idx].unwrap_or(0.0);
                    }
                }
                if amounts.is_some() {
                    result.by_category = ranked(sums);
                }
                result.category_counts = ranked(counts);
            }
            None => debug!(column = %name, "category column not present"),
        }
    }

    info!(
        rows = result.row_count,
        total = result.amount_total,
        months = result.monthly.len(),
        undated = result.undated_rows,
        "summarized table"
    );
    Ok(result)
}

/// Reads a cell as an amount. Text is accepted when it parses as a number.
fn amount_value(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(number) => Some(*number),
        Value::Text(text) => parse_f64(text),
        Value::Date(_) | Value::Absent => None,
    }
}

/// Orders a grouped series by descending value, ties broken by key.
fn ranked(groups: BTreeMap<String, f64>) -> Vec<GroupedPoint> {
    let mut points: Vec<GroupedPoint> = groups
        .into_iter()
        .map(|(key, value)| GroupedPoint::new(key, value))
        .collect();
    points.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.key.cmp(&b.key)));
    points
}
