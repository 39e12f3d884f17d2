//! Delimited-text reading.
//!
//! Used to read back exported CSV and for CSV fixtures; not part of the
//! accepted workbook batch.

use polars::prelude::DataFrame;
use sheetjoin_common::parse_f64;
use sheetjoin_model::Value;

use crate::error::Result;
use crate::table::table_from_grid;

/// Reads comma-separated text whose first record is the header row.
///
/// Cells that parse as finite numbers become numbers; everything else is
/// text, and empty cells are absent.
pub fn read_delimited(bytes: &[u8]) -> Result<DataFrame> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<Value> = if grid.is_empty() {
            record.iter().map(Value::text).collect()
        } else {
            record.iter().map(delimited_cell).collect()
        };
        grid.push(row);
    }
    table_from_grid(grid)
}

fn delimited_cell(raw: &str) -> Value {
    parse_f64(raw).map_or_else(|| Value::text(raw.trim()), Value::Number)
}
