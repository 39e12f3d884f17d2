//! Date parsing and date-column coercion.
//!
//! Source spreadsheets carry dates as real date cells, as serial day numbers
//! or as free text in a handful of regional layouts. Coercion turns a named
//! column into a date column; anything that cannot be read as a date becomes
//! absent and is counted, never raised.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use polars::prelude::{DataFrame, DataType, IntoColumn, NamedFrom, Series};
use serde::Serialize;
use sheetjoin_common::{column_values, date_to_days, find_column};
use sheetjoin_model::{DateOrder, Value};
use tracing::{debug, info, info_span};

use crate::error::Result;

/// Month-name layouts, tried after the numeric ones.
const MONTH_NAME_FORMATS: &[&str] = &[
    "%d %B %Y",
    "%d-%B-%Y",
    "%d-%B-%y",
    "%d %B, %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Serial day number after 9999-12-31, the last date spreadsheets support.
const MAX_SERIAL: f64 = 2_958_466.0;

/// Two-digit years below this are in the 2000s, the rest in the 1900s.
const TWO_DIGIT_YEAR_PIVOT: i32 = 70;

/// Parses a date from text.
///
/// Accepts ISO `YYYY-MM-DD` and `YYYY/MM/DD`, numeric day/month/year layouts
/// separated by `/`, `-` or `.` (resolved by `order`), and month-name layouts
/// such as `05 Jan 2024`, `Jan 05, 2024` or `05-Jan-2024`. A trailing time of
/// day is ignored.
///
/// A numeric layout that is impossible in the given order (month above 12)
/// is not a date; the order is never switched per value.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sheetjoin_model::DateOrder;
/// use sheetjoin_transform::parse_date;
///
/// let march_4 = NaiveDate::from_ymd_opt(2024, 3, 4);
/// assert_eq!(parse_date("03/04/2024", DateOrder::MonthFirst), march_4);
/// assert_eq!(parse_date("04/03/2024", DateOrder::DayFirst), march_4);
/// assert_eq!(parse_date("2024-03-04T08:15:00", DateOrder::DayFirst), march_4);
/// assert_eq!(parse_date("not-a-date", DateOrder::MonthFirst), None);
/// ```
pub fn parse_date(raw: &str, order: DateOrder) -> Option<NaiveDate> {
    let date_part = strip_time(raw.trim())?;
    parse_numeric(&date_part, order).or_else(|| parse_month_name(&date_part))
}

/// Converts a spreadsheet serial day number to a date.
///
/// Serial 1 is 1900-01-01. Serial 60 is the nonexistent 1900-02-29 carried by
/// spreadsheet applications and is rejected, as is anything past 9999-12-31.
/// The fractional part (time of day) is ignored.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..MAX_SERIAL).contains(&serial) {
        return None;
    }
    let days = serial.trunc() as u64;
    if days == 60 {
        return None;
    }
    let base = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    base.checked_add_days(Days::new(days))
}

/// Drops a trailing time of day and normalizes inner whitespace.
fn strip_time(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    let mut tokens: Vec<&str> = raw.split_whitespace().collect();
    if let Some(first) = tokens.first().copied()
        && let Some((date, _time)) = first.split_once('T')
        && date.starts_with(|c: char| c.is_ascii_digit())
    {
        tokens[0] = date;
    }
    while tokens.len() > 1 && tokens.last().is_some_and(|token| is_time_token(token)) {
        tokens.pop();
    }
    Some(tokens.join(" "))
}

fn is_time_token(token: &str) -> bool {
    let upper = token.to_ascii_uppercase();
    if upper == "AM" || upper == "PM" {
        return true;
    }
    token.contains(':')
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || c == ':' || c == '.')
}

fn parse_numeric(text: &str, order: DateOrder) -> Option<NaiveDate> {
    let separator = ['/', '-', '.'].into_iter().find(|sep| text.contains(*sep))?;
    let parts: Vec<&str> = text.split(separator).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };
    if ![first, second, third]
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    if first.len() == 4 {
        // Year-first layouts are unambiguous.
        let year: i32 = first.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, second.parse().ok()?, third.parse().ok()?);
    }

    let year = parse_year(third)?;
    let a: u32 = first.parse().ok()?;
    let b: u32 = second.parse().ok()?;
    let (month, day) = if order.is_day_first() { (b, a) } else { (a, b) };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year(text: &str) -> Option<i32> {
    let year: i32 = text.parse().ok()?;
    match text.len() {
        2 if year < TWO_DIGIT_YEAR_PIVOT => Some(2000 + year),
        2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

fn parse_month_name(text: &str) -> Option<NaiveDate> {
    MONTH_NAME_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Outcome of coercing one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercionReport {
    pub column: String,
    /// Non-absent cells that became dates.
    pub parsed: usize,
    /// Non-absent cells that could not be read as dates and became absent.
    pub skipped: usize,
}

/// A table after date coercion, with one report per coerced column.
#[derive(Debug, Clone)]
pub struct CoercedTable {
    pub data: DataFrame,
    pub reports: Vec<CoercionReport>,
}

impl CoercedTable {
    /// Total cells turned absent across all columns.
    pub fn skipped(&self) -> usize {
        self.reports.iter().map(|report| report.skipped).sum()
    }
}

/// Converts the named columns to date columns.
///
/// Date cells are kept, text is parsed with [`parse_date`] and numbers are
/// read as spreadsheet serial days. Unreadable cells become absent. Columns
/// missing from the table are skipped; the row count never changes.
pub fn coerce_dates(df: &DataFrame, columns: &[String], order: DateOrder) -> Result<CoercedTable> {
    let span = info_span!("coerce_dates", columns = columns.len());
    let _guard = span.enter();

    let mut data = df.clone();
    let mut reports = Vec::new();
    let mut seen = HashSet::new();
    for name in columns {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let Some(column) = find_column(df, name) else {
            debug!(column = %name, "date column not present, skipping");
            continue;
        };

        let mut report = CoercionReport {
            column: name.clone(),
            parsed: 0,
            skipped: 0,
        };
        let mut days: Vec<Option<i32>> = Vec::with_capacity(column.len());
        for value in column_values(column)? {
            let date = match &value {
                Value::Absent => {
                    days.push(None);
                    continue;
                }
                Value::Date(date) => Some(*date),
                Value::Text(text) => parse_date(text, order),
                Value::Number(serial) => excel_serial_to_date(*serial),
            };
            match date {
                Some(date) => {
                    report.parsed += 1;
                    days.push(Some(date_to_days(date)));
                }
                None => {
                    report.skipped += 1;
                    debug!(column = %name, value = ?value, "value is not a date");
                    days.push(None);
                }
            }
        }

        let coerced = Series::new(name.as_str().into(), days).cast(&DataType::Date)?;
        data.with_column(coerced.into_column())?;
        info!(
            column = %name,
            parsed = report.parsed,
            skipped = report.skipped,
            "coerced date column"
        );
        reports.push(report);
    }
    Ok(CoercedTable { data, reports })
}
