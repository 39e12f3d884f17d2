//! The filter chain.
//!
//! Every applicable filter must hold for a row to survive, so the
//! order of filters never changes the result. A filter naming
//! a column the table does not have is skipped and reported.

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use sheetjoin_common::{column_values, find_column, render_value};
use sheetjoin_model::{FilterSpec, Value};
use tracing::{debug, info, info_span};

use crate::error::Result;

/// The filtered view plus which filters took part.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub data: DataFrame,
    /// Filters whose column exists, in input order.
    pub applied: Vec<FilterSpec>,
    /// Filters skipped because their column is missing.
    pub skipped: Vec<FilterSpec>,
}

/// Whether one cell satisfies a filter.
///
/// Absent cells never match. Date filters only match date cells;
/// category filters compare the cell's textual form.
pub fn matches_filter(spec: &FilterSpec, value: &Value) -> bool {
    match spec {
        FilterSpec::ExactDate { date, .. } => value.as_date() == Some(*date),
        FilterSpec::DateRange { start, end, .. } => value
            .as_date()
            .is_some_and(|cell| *start <= cell && cell <= *end),
        FilterSpec::Category { value: wanted, .. } => {
            render_value(value).is_some_and(|text| text == *wanted)
        }
        FilterSpec::AnyOf { values, .. } => {
            render_value(value).is_some_and(|text| values.contains(&text))
        }
    }
}

/// Applies the filter chain and returns the filtered view.
///
/// An empty chain, or one whose every filter is skipped, returns the
/// input unchanged.
pub fn apply_filters(df: &DataFrame, specs: &[FilterSpec]) -> Result<FilterOutcome> {
    let span = info_span!("filter", specs = specs.len());
    let _guard = span.enter();

    let mut keep = vec![true; df.height()];
    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    for spec in specs {
        let Some(column) = find_column(df, spec.column()) else {
            debug!(filter = %spec, "column not present, filter skipped");
            skipped.push(spec.clone());
            continue;
        };
        for (flag, value) in keep.iter_mut().zip(column_values(column)?) {
            *flag = *flag && matches_filter(spec, &value);
        }
        applied.push(spec.clone());
    }

    let data = if applied.is_empty() {
        df.clone()
    } else {
        let mask = BooleanChunked::from_slice("filter".into(), &keep);
        df.filter(&mask)?
    };
    info!(
        rows_in = df.height(),
        rows_out = data.height(),
        applied = applied.len(),
        skipped = skipped.len(),
        "applied filters"
    );
    Ok(FilterOutcome {
        data,
        applied,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let spec = FilterSpec::date_range("Check In", date(2024, 1, 1), date(2024, 1, 31));
        assert!(matches_filter(&spec, &Value::Date(date(2024, 1, 1))));
        assert!(matches_filter(&spec, &Value::Date(date(2024, 1, 31))));
        assert!(!matches_filter(&spec, &Value::Date(date(2024, 2, 1))));
        assert!(!matches_filter(&spec, &Value::Absent));
    }

    #[test]
    fn test_reversed_range_matches_nothing() {
        let spec = FilterSpec::date_range("Check In", date(2024, 2, 1), date(2024, 1, 1));
        assert!(!matches_filter(&spec, &Value::Date(date(2024, 1, 15))));
    }

    #[test]
    fn test_date_filters_ignore_text_cells() {
        let spec = FilterSpec::exact_date("Check In", date(2024, 1, 5));
        assert!(matches_filter(&spec, &Value::Date(date(2024, 1, 5))));
        assert!(!matches_filter(&spec, &Value::text("2024-01-05")));
    }

    #[test]
    fn test_category_compares_text_form() {
        let spec = FilterSpec::category("Nights", "2");
        assert!(matches_filter(&spec, &Value::Number(2.0)));
        assert!(!matches_filter(&spec, &Value::Number(2.5)));
        assert!(!matches_filter(&spec, &Value::Absent));
    }

    #[test]
    fn test_apply_filters_keeps_matching_rows() {
        let df = DataFrame::new(vec![
            Series::new("Department".into(), vec![Some("HR"), Some("Ops"), None, Some("HR")])
                .into_column(),
        ])
        .unwrap();
        let outcome = apply_filters(&df, &[FilterSpec::category("Department", "HR")]).unwrap();
        assert_eq!(outcome.data.height(), 2);
        assert_eq!(outcome.applied.len(), 1);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_empty_any_of_matches_nothing() {
        let spec = FilterSpec::any_of("Department", Vec::<String>::new());
        assert!(!matches_filter(&spec, &Value::text("Finance")));
    }
}
