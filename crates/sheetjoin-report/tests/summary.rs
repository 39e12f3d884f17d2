//! Aggregation over ingested-style tables.

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use serde_json::json;
use sheetjoin_common::column_from_values;
use sheetjoin_model::{FilterSpec, GroupedPoint, Metric, SummaryOptions, Value};
use sheetjoin_report::summarize;
use sheetjoin_transform::{apply_filters, consolidate};

fn date(y: i32, m: u32, d: u32) -> Value {
    Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn bookings() -> DataFrame {
    let departments = [
        "Finance", "HR", "Finance", "Ops", "HR", "Finance", "Ops", "HR", "Finance", "Ops",
    ];
    let department: Vec<Value> = departments.iter().map(|d| Value::text(*d)).collect();
    let employee: Vec<Value> = (0..10).map(|i| Value::text(format!("E{}", i % 7))).collect();
    let amount: Vec<Value> = (1..=10).map(|i| Value::Number(f64::from(i) * 10.0)).collect();
    let check_in = vec![
        date(2024, 2, 3),
        date(2024, 1, 10),
        date(2024, 1, 20),
        Value::Absent,
        date(2023, 12, 31),
        date(2024, 2, 28),
        date(2024, 1, 1),
        Value::Absent,
        date(2024, 3, 15),
        date(2024, 2, 1),
    ];
    DataFrame::new(vec![
        column_from_values("Employee", &employee).unwrap(),
        column_from_values("Department", &department).unwrap(),
        column_from_values("Amount", &amount).unwrap(),
        column_from_values("Check In", &check_in).unwrap(),
    ])
    .unwrap()
}

fn options() -> SummaryOptions {
    SummaryOptions::new()
        .with_amount_column("Amount")
        .with_category_column("Department")
        .with_distinct_columns(["Employee", "Department", "Not There"])
}

#[test]
fn filtered_view_row_count_matches_summary() {
    let outcome = apply_filters(&bookings(), &[FilterSpec::category("Department", "Finance")]).unwrap();
    assert_eq!(outcome.data.height(), 4);

    let result = summarize(&outcome.data, &options()).unwrap();
    assert_eq!(result.row_count, 4);
    assert_eq!(result.metrics().get("rows"), Some(&Metric::Count(4)));
    // Finance rows are amounts 10, 30, 60 and 90.
    assert_eq!(result.amount_total, 190.0);
}

#[test]
fn empty_batch_summarizes_to_zero() {
    let unified = consolidate(&[]).unwrap();
    assert_eq!(unified.height(), 0);

    let result = summarize(&unified, &options()).unwrap();
    assert_eq!(result.row_count, 0);
    assert_eq!(result.amount_total, 0.0);
    assert!(result.distinct_counts.is_empty());
    assert!(result.monthly.is_empty());
    assert_eq!(result.metrics().get("total:Amount"), Some(&Metric::Sum(0.0)));
}

#[test]
fn monthly_series_is_chronological_and_counts_undated_rows() {
    let result = summarize(&bookings(), &options()).unwrap();
    assert_eq!(
        result.monthly,
        vec![
            GroupedPoint::new("2023-12", 50.0),
            GroupedPoint::new("2024-01", 20.0 + 30.0 + 70.0),
            GroupedPoint::new("2024-02", 10.0 + 60.0 + 100.0),
            GroupedPoint::new("2024-03", 90.0),
        ]
    );
    assert_eq!(result.undated_rows, 2);
    let dated: f64 = result.monthly.iter().map(|p| p.value).sum();
    assert_eq!(dated + 40.0 + 80.0, result.amount_total);
}

#[test]
fn distinct_counts_skip_missing_columns() {
    let result = summarize(&bookings(), &options()).unwrap();
    assert_eq!(result.distinct("Employee"), Some(7));
    assert_eq!(result.distinct("Department"), Some(3));
    assert_eq!(result.distinct("Not There"), None);
}

#[test]
fn category_rollups_rank_by_value() {
    let result = summarize(&bookings(), &options()).unwrap();
    assert_eq!(
        result.by_category,
        vec![
            GroupedPoint::new("Ops", 40.0 + 70.0 + 100.0),
            GroupedPoint::new("Finance", 190.0),
            GroupedPoint::new("HR", 20.0 + 50.0 + 80.0),
        ]
    );
    assert_eq!(
        result.category_counts,
        vec![
            GroupedPoint::new("Finance", 4.0),
            GroupedPoint::new("HR", 3.0),
            GroupedPoint::new("Ops", 3.0),
        ]
    );
}

#[test]
fn missing_amount_column_totals_zero() {
    let result = summarize(
        &bookings(),
        &SummaryOptions::new().with_amount_column("Total Cost"),
    )
    .unwrap();
    assert_eq!(result.amount_total, 0.0);
    assert!(result.monthly.is_empty());
    assert_eq!(result.undated_rows, 0);
}

#[test]
fn result_serializes_for_chart_consumers() {
    let outcome = apply_filters(&bookings(), &[FilterSpec::category("Department", "HR")]).unwrap();
    let result = summarize(
        &outcome.data,
        &SummaryOptions::new().with_amount_column("Amount"),
    )
    .unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["row_count"], json!(3));
    assert_eq!(
        value["monthly"],
        json!([
            {"key": "2023-12", "value": 50.0},
            {"key": "2024-01", "value": 20.0},
        ])
    );
    assert_eq!(value["undated_rows"], json!(1));
}

#[test]
fn text_placeholder_in_one_file_keeps_other_amounts() {
    let january = DataFrame::new(vec![
        column_from_values("Amount", &[Value::Number(100.0), Value::Number(250.0)]).unwrap(),
        column_from_values("Check In", &[date(2024, 1, 5), date(2024, 2, 9)]).unwrap(),
    ])
    .unwrap();
    let february = DataFrame::new(vec![
        column_from_values("Amount", &[Value::text("-")]).unwrap(),
        column_from_values("Check In", &[date(2024, 2, 12)]).unwrap(),
    ])
    .unwrap();
    let unified = consolidate(&[january, february]).unwrap();

    let result = summarize(&unified, &SummaryOptions::new().with_amount_column("Amount")).unwrap();
    assert_eq!(result.amount_total, 350.0);
    assert_eq!(
        result.monthly,
        vec![
            GroupedPoint::new("2024-01", 100.0),
            GroupedPoint::new("2024-02", 250.0),
        ]
    );
}

#[test]
fn monthly_series_orders_by_date_not_key_text() {
    let df = DataFrame::new(vec![
        column_from_values("Amount", &[Value::Number(1.0), Value::Number(2.0)]).unwrap(),
        column_from_values("Check In", &[date(10_113, 9, 1), date(2024, 1, 5)]).unwrap(),
    ])
    .unwrap();

    let result = summarize(&df, &SummaryOptions::new().with_amount_column("Amount")).unwrap();
    let keys: Vec<&str> = result.monthly.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["2024-01", "+10113-09"]);
}
