//! Polars DataFrame helper functions.
//!
//! Column lookups return `Option` so that every caller decides explicitly
//! what a missing column means for its own operation.

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, DataType};

/// Returns the column with exactly this name, if the table has one.
pub fn find_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a Column> {
    df.get_columns()
        .iter()
        .find(|column| column.name().as_str() == name)
}

/// Returns the table's column names in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Whether a column of this type can be read as cells and exported.
pub fn is_supported_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::String | DataType::Boolean | DataType::Date | DataType::Datetime(_, _) | DataType::Null
    ) || is_numeric_dtype(dtype)
}

pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use sheetjoin_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// assert_eq!(format_numeric(120.0), "120");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Formats a date as ISO 8601 `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
///
/// Thousands separators are not accepted: `1,000` stays text.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.5), "1.5");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(-0.0), "0");
        assert_eq!(format_numeric(-2.25), "-2.25");
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("  "), None);
        assert_eq!(parse_f64("3.14"), Some(3.14));
        assert_eq!(parse_f64("  3.14  "), Some(3.14));
        assert_eq!(parse_f64("1,000"), None);
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("invalid"), None);
    }

    #[test]
    fn test_find_column_is_exact() {
        let df = DataFrame::new(vec![
            Series::new("Check In".into(), vec!["2024-01-01"]).into_column(),
        ])
        .unwrap();
        assert!(find_column(&df, "Check In").is_some());
        assert!(find_column(&df, "check in").is_none());
        assert_eq!(column_names(&df), vec!["Check In"]);
    }

    #[test]
    fn test_supported_dtypes() {
        assert!(is_supported_dtype(&DataType::String));
        assert!(is_supported_dtype(&DataType::Int64));
        assert!(is_supported_dtype(&DataType::Date));
        assert!(!is_supported_dtype(&DataType::Binary));
    }
}
