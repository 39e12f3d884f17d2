//! Workbook reading via calamine.

use std::fmt::Display;
use std::io::Cursor;

use calamine::{Data, Reader, Sheets, Xls, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::DataFrame;
use sheetjoin_model::Value;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::source::WorkbookFormat;
use crate::table::table_from_grid;

/// Reads the first sheet of a workbook held in memory.
///
/// The first row of the sheet's used range is the header row. Other sheets
/// are ignored. Zero-byte input and workbooks without sheets yield an empty
/// table.
pub fn read_workbook_bytes(bytes: &[u8], format: WorkbookFormat) -> Result<DataFrame> {
    if bytes.is_empty() {
        return Ok(DataFrame::empty());
    }

    let cursor = Cursor::new(bytes);
    let mut workbook: Sheets<Cursor<&[u8]>> = match format {
        WorkbookFormat::Xlsx => Sheets::Xlsx(Xlsx::new(cursor).map_err(workbook_error)?),
        WorkbookFormat::Xls => Sheets::Xls(Xls::new(cursor).map_err(workbook_error)?),
    };

    let Some(range) = workbook.worksheet_range_at(0) else {
        debug!("workbook has no sheets");
        return Ok(DataFrame::empty());
    };
    let range = range.map_err(workbook_error)?;

    let (height, width) = range.get_size();
    debug!(height, width, "read first sheet");

    let grid: Vec<Vec<Value>> = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect();
    table_from_grid(grid)
}

fn workbook_error(err: impl Display) -> IngestError {
    IngestError::Workbook {
        message: err.to_string(),
    }
}

/// Maps a workbook cell to the cell model.
///
/// Date-times keep only their calendar date. Booleans become text. Error and
/// blank cells are absent.
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Int(v) => Value::number(*v as f64),
        Data::Float(v) => Value::number(*v),
        Data::String(s) => Value::text(s.trim().trim_matches('\u{feff}')),
        Data::Bool(b) => Value::Text(b.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(Value::Absent, |datetime| Value::Date(datetime.date())),
        Data::DateTimeIso(s) => parse_iso_date(s).map_or_else(|| Value::text(s), Value::Date),
        Data::DurationIso(s) => Value::text(s),
        Data::Error(_) | Data::Empty => Value::Absent,
    }
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|datetime| datetime.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_cell_values() {
        assert_eq!(cell_value(&Data::Int(3)), Value::Number(3.0));
        assert_eq!(cell_value(&Data::Float(2.5)), Value::Number(2.5));
        assert_eq!(
            cell_value(&Data::String("  Finance ".to_string())),
            Value::text("Finance")
        );
        assert_eq!(cell_value(&Data::String("   ".to_string())), Value::Absent);
        assert_eq!(cell_value(&Data::Bool(true)), Value::text("true"));
        assert_eq!(cell_value(&Data::Empty), Value::Absent);
        assert_eq!(cell_value(&Data::Error(CellErrorType::Div0)), Value::Absent);
    }

    #[test]
    fn test_iso_cells_truncate_to_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            cell_value(&Data::DateTimeIso("2024-03-09T14:30:00".to_string())),
            Value::Date(expected)
        );
        assert_eq!(
            cell_value(&Data::DateTimeIso("2024-03-09".to_string())),
            Value::Date(expected)
        );
    }

    #[test]
    fn test_zero_bytes_is_empty_table() {
        let df = read_workbook_bytes(&[], WorkbookFormat::Xlsx).unwrap();
        assert_eq!(df.width(), 0);
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_corrupt_bytes_fail() {
        let err = read_workbook_bytes(b"definitely not a zip", WorkbookFormat::Xlsx).unwrap_err();
        assert!(matches!(err, IngestError::Workbook { .. }));
    }
}
