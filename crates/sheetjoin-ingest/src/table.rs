//! Building record tables from a grid of cells.
//!
//! Workbook sheets and delimited text are both reduced to a grid whose first
//! row holds the headers. The rules here are shared so both sources produce
//! the same column names and types.

use std::collections::HashSet;

use polars::prelude::DataFrame;
use sheetjoin_common::{column_from_values, render_value};
use sheetjoin_model::Value;

use crate::error::Result;

/// Normalizes a header label.
///
/// Trims surrounding whitespace, strips a byte-order mark and collapses
/// internal whitespace runs to a single space.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Turns raw header labels into unique column names.
///
/// Blank labels become `Unnamed: <index>`. Repeated labels get `.1`, `.2`,
/// ... suffixes in order of appearance.
pub fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, label) in raw.iter().enumerate() {
        let base = match normalize_header(label) {
            name if name.is_empty() => format!("Unnamed: {idx}"),
            name => name,
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}

/// Builds a table from a header row followed by data rows.
///
/// Rows whose cells are all absent are dropped. Short rows are padded with
/// absent cells; cells beyond the header get an `Unnamed` column. An empty
/// grid yields a table with no columns and no rows.
pub fn table_from_grid(grid: Vec<Vec<Value>>) -> Result<DataFrame> {
    let mut rows = grid.into_iter();
    let Some(header_row) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let data: Vec<Vec<Value>> = rows
        .filter(|row| row.iter().any(|cell| !cell.is_absent()))
        .collect();

    let width = data
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header_row.len()))
        .max()
        .unwrap_or(0);
    let labels: Vec<String> = (0..width)
        .map(|idx| {
            header_row
                .get(idx)
                .and_then(render_value)
                .unwrap_or_default()
        })
        .collect();
    let headers = unique_headers(&labels);

    let mut columns = Vec::with_capacity(width);
    for (idx, header) in headers.iter().enumerate() {
        let values: Vec<Value> = data
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect();
        columns.push(column_from_values(header, &values)?);
    }
    Ok(DataFrame::new(columns)?)
}
