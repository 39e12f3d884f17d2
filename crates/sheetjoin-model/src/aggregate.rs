//! Summary metrics derived from a (filtered) record table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One `(group key, value)` pair of a grouped series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedPoint {
    pub key: String,
    pub value: f64,
}

impl GroupedPoint {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Distinct non-absent values in one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistinctCount {
    pub column: String,
    pub count: usize,
}

/// A named metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Metric {
    Count(usize),
    Sum(f64),
    Series(Vec<GroupedPoint>),
}

/// The result of summarizing a table.
///
/// Derived and read-only: a new result is computed whenever the filtered view
/// changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    pub row_count: usize,
    pub column_count: usize,
    /// Distinct counts for configured columns present in the table, in
    /// configuration order.
    pub distinct_counts: Vec<DistinctCount>,
    /// Configured numeric column, if any.
    pub amount_column: Option<String>,
    /// Sum of `amount_column`; zero when the column is missing.
    pub amount_total: f64,
    /// Monthly sums keyed `YYYY-MM`, oldest first.
    pub monthly: Vec<GroupedPoint>,
    /// Rows left out of `monthly` because their date is absent.
    pub undated_rows: usize,
    /// Per-category sums, largest first.
    pub by_category: Vec<GroupedPoint>,
    /// Per-category row counts, largest first.
    pub category_counts: Vec<GroupedPoint>,
}

impl AggregateResult {
    /// Distinct count for a column, if it was computed.
    pub fn distinct(&self, column: &str) -> Option<usize> {
        self.distinct_counts
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.count)
    }

    /// Flattens the result into a metric-name keyed map.
    pub fn metrics(&self) -> BTreeMap<String, Metric> {
        let mut metrics = BTreeMap::new();
        metrics.insert("rows".to_string(), Metric::Count(self.row_count));
        metrics.insert("columns".to_string(), Metric::Count(self.column_count));
        for entry in &self.distinct_counts {
            metrics.insert(
                format!("distinct:{}", entry.column),
                Metric::Count(entry.count),
            );
        }
        if let Some(column) = &self.amount_column {
            metrics.insert(format!("total:{column}"), Metric::Sum(self.amount_total));
            if !self.monthly.is_empty() {
                metrics.insert(
                    format!("monthly:{column}"),
                    Metric::Series(self.monthly.clone()),
                );
            }
            if !self.by_category.is_empty() {
                metrics.insert(
                    format!("by_category:{column}"),
                    Metric::Series(self.by_category.clone()),
                );
            }
        }
        if !self.category_counts.is_empty() {
            metrics.insert(
                "count_by_category".to_string(),
                Metric::Series(self.category_counts.clone()),
            );
        }
        metrics
    }
}
