//! Parsing of filter flags into [`FilterSpec`] values.
//!
//! | flag | form | filter |
//! |---|---|---|
//! | `--on-date` | `COLUMN=YYYY-MM-DD` | exact date |
//! | `--date-range` | `COLUMN=START..END` | inclusive date range |
//! | `--where` | `COLUMN=VALUE` | single category |
//! | `--any-of` | `COLUMN=V1,V2,...` | multi category |

use chrono::NaiveDate;
use sheetjoin_model::FilterSpec;

/// Parses `COLUMN=YYYY-MM-DD`.
pub fn parse_on_date(raw: &str) -> Result<FilterSpec, String> {
    let (column, value) = split_assignment(raw)?;
    Ok(FilterSpec::exact_date(column, parse_flag_date(value)?))
}

/// Parses `COLUMN=START..END`.
pub fn parse_date_range(raw: &str) -> Result<FilterSpec, String> {
    let (column, value) = split_assignment(raw)?;
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got {value:?}"))?;
    Ok(FilterSpec::date_range(
        column,
        parse_flag_date(start)?,
        parse_flag_date(end)?,
    ))
}

/// Parses `COLUMN=VALUE`.
pub fn parse_where(raw: &str) -> Result<FilterSpec, String> {
    let (column, value) = split_assignment(raw)?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("missing value in {raw:?}"));
    }
    Ok(FilterSpec::category(column, value))
}

/// Parses `COLUMN=V1,V2,...`. Blank entries are ignored.
pub fn parse_any_of(raw: &str) -> Result<FilterSpec, String> {
    let (column, value) = split_assignment(raw)?;
    let values = value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty());
    Ok(FilterSpec::any_of(column, values))
}

fn split_assignment(raw: &str) -> Result<(&str, &str), String> {
    let (column, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got {raw:?}"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in {raw:?}"));
    }
    Ok((column, value))
}

fn parse_flag_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid date {raw:?} (expected YYYY-MM-DD): {err}"))
}
