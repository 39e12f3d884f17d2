//! Tests for filter flag parsing.

use chrono::NaiveDate;
use sheetjoin_cli::filters::{parse_any_of, parse_date_range, parse_on_date, parse_where};
use sheetjoin_model::FilterSpec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_on_date() {
    assert_eq!(
        parse_on_date("Check In=2024-01-15").unwrap(),
        FilterSpec::exact_date("Check In", date(2024, 1, 15))
    );
    assert!(parse_on_date("Check In=15/01/2024").is_err());
}

#[test]
fn test_date_range() {
    assert_eq!(
        parse_date_range("Check In=2024-01-01..2024-01-31").unwrap(),
        FilterSpec::date_range("Check In", date(2024, 1, 1), date(2024, 1, 31))
    );
    assert!(parse_date_range("Check In=2024-01-01").is_err());
}

#[test]
fn test_value_may_contain_equals_sign() {
    assert_eq!(
        parse_where("Note=a=b").unwrap(),
        FilterSpec::category("Note", "a=b")
    );
}

#[test]
fn test_where_requires_column_and_value() {
    assert!(parse_where("Department").is_err());
    assert!(parse_where("=Finance").is_err());
    assert!(parse_where("Department=  ").is_err());
}

#[test]
fn test_any_of_drops_blank_entries() {
    assert_eq!(
        parse_any_of("Department=HR, Finance,,").unwrap(),
        FilterSpec::any_of("Department", ["HR", "Finance"])
    );
    assert_eq!(
        parse_any_of("Department=").unwrap(),
        FilterSpec::any_of("Department", Vec::<String>::new())
    );
}
