//! Configuration options for a consolidation run.

use serde::{Deserialize, Serialize};

use crate::denylist::ColumnDenylist;
use crate::filter::FilterSpec;

/// Day/month ordering used when parsing numeric dates such as `03/04/2024`.
///
/// The order is chosen once per run and applied to every value of every
/// coerced column; it is never guessed per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `03/04/2024` is March 4th.
    #[default]
    MonthFirst,
    /// `03/04/2024` is April 3rd.
    DayFirst,
}

impl DateOrder {
    pub fn from_day_first(day_first: bool) -> Self {
        if day_first {
            Self::DayFirst
        } else {
            Self::MonthFirst
        }
    }

    pub fn is_day_first(self) -> bool {
        matches!(self, Self::DayFirst)
    }
}

/// Columns the summary step reads.
///
/// Every column is optional; a configured column missing from the table only
/// removes the metrics that depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// Date column used as the monthly grouping key.
    pub date_column: Option<String>,
    /// Numeric column that is summed.
    pub amount_column: Option<String>,
    /// Text column used for per-category rollups.
    pub category_column: Option<String>,
    /// Columns whose distinct values are counted.
    pub distinct_columns: Vec<String>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            date_column: Some("Check In".to_string()),
            amount_column: None,
            category_column: None,
            distinct_columns: Vec::new(),
        }
    }
}

impl SummaryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_amount_column(mut self, column: impl Into<String>) -> Self {
        self.amount_column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_category_column(mut self, column: impl Into<String>) -> Self {
        self.category_column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_distinct_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.distinct_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// Options controlling one ingestion-and-analysis session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Columns dropped from every source table.
    pub denylist: ColumnDenylist,
    /// Columns converted to dates after consolidation.
    pub date_columns: Vec<String>,
    /// Day/month convention for the whole run.
    pub date_order: DateOrder,
    /// Columns read by the summary step.
    pub summary: SummaryOptions,
    /// Filters applied when the caller does not supply its own.
    pub filters: Vec<FilterSpec>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            denylist: ColumnDenylist::standard(),
            date_columns: vec!["Check In".to_string(), "Check Out".to_string()],
            date_order: DateOrder::MonthFirst,
            summary: SummaryOptions::default(),
            filters: Vec::new(),
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_denylist(mut self, denylist: ColumnDenylist) -> Self {
        self.denylist = denylist;
        self
    }

    #[must_use]
    pub fn with_date_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: SummaryOptions) -> Self {
        self.summary = summary;
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: Vec<FilterSpec>) -> Self {
        self.filters = filters;
        self
    }
}
