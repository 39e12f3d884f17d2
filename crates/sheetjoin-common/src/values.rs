//! Conversion between Polars columns and [`Value`] cells.
//!
//! Column types used by record tables:
//!
//! - `String` for text cells
//! - `Float64` for number cells
//! - `Date` for date cells
//!
//! Polars null is the absent marker in every column type.

use chrono::{Datelike, NaiveDate};
use polars::prelude::{Column, DataType, IntoColumn, NamedFrom, PolarsResult, Series};
use sheetjoin_model::{Value, ValueKind};

use crate::polars::{format_date, format_numeric, is_numeric_dtype};

/// Days from 0001-01-01 (CE day 1) to 1970-01-01, the Polars date epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts a date to Polars' physical date representation.
pub fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Converts Polars' physical date representation back to a date.
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Renders a cell as text, `None` for absent cells.
///
/// Numbers drop trailing zeros and dates use `YYYY-MM-DD`, so the rendering
/// is stable across source files.
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Text(text) => Some(text.clone()),
        Value::Number(number) => Some(format_numeric(*number)),
        Value::Date(date) => Some(format_date(*date)),
        Value::Absent => None,
    }
}

/// Picks the column type for a set of cells.
///
/// Cells of a single kind keep that kind; mixed or entirely absent cells
/// become text.
pub fn column_kind(values: &[Value]) -> ValueKind {
    let mut kinds = values.iter().filter_map(Value::kind);
    let Some(first) = kinds.next() else {
        return ValueKind::Text;
    };
    if kinds.all(|kind| kind == first) {
        first
    } else {
        ValueKind::Text
    }
}

/// Builds a column from cells, choosing its type with [`column_kind`].
pub fn column_from_values(name: &str, values: &[Value]) -> PolarsResult<Column> {
    let series = match column_kind(values) {
        ValueKind::Number => Series::new(
            name.into(),
            values.iter().map(Value::as_number).collect::<Vec<_>>(),
        ),
        ValueKind::Date => Series::new(
            name.into(),
            values
                .iter()
                .map(|value| value.as_date().map(date_to_days))
                .collect::<Vec<Option<i32>>>(),
        )
        .cast(&DataType::Date)?,
        ValueKind::Text => Series::new(
            name.into(),
            values.iter().map(render_value).collect::<Vec<_>>(),
        ),
    };
    Ok(series.into_column())
}

/// Reads every cell of a column.
///
/// Column types outside the record table model are read through their
/// string cast.
pub fn column_values(column: &Column) -> PolarsResult<Vec<Value>> {
    let dtype = column.dtype();
    match dtype {
        DataType::Null => Ok(vec![Value::Absent; column.len()]),
        DataType::String => Ok(column
            .str()?
            .into_iter()
            .map(|cell| cell.map_or(Value::Absent, Value::text))
            .collect()),
        DataType::Boolean => Ok(column
            .bool()?
            .into_iter()
            .map(|cell| cell.map_or(Value::Absent, |flag| Value::Text(flag.to_string())))
            .collect()),
        DataType::Date | DataType::Datetime(_, _) => {
            let dates = if matches!(dtype, DataType::Date) {
                column.clone()
            } else {
                column.cast(&DataType::Date)?
            };
            let days = dates.cast(&DataType::Int32)?;
            Ok(days
                .i32()?
                .into_iter()
                .map(|cell| {
                    cell.and_then(date_from_days)
                        .map_or(Value::Absent, Value::Date)
                })
                .collect())
        }
        _ if is_numeric_dtype(dtype) => {
            let numbers = column.cast(&DataType::Float64)?;
            Ok(numbers
                .f64()?
                .into_iter()
                .map(|cell| cell.map_or(Value::Absent, Value::number))
                .collect())
        }
        _ => {
            let text = column.cast(&DataType::String)?;
            Ok(text
                .str()?
                .into_iter()
                .map(|cell| cell.map_or(Value::Absent, Value::text))
                .collect())
        }
    }
}
