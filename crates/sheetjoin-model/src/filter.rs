//! Declarative row-selection rules.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single filter rule scoped to one column.
///
/// A chain of rules is combined with logical AND. A rule
/// whose column is missing from the table selects every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpec {
    /// Cell date equals `date`.
    ExactDate { column: String, date: NaiveDate },
    /// Cell date lies in `start..=end`.
    DateRange {
        column: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// Cell text equals `value`.
    Category { column: String, value: String },
    /// Cell text is one of `values`.
    AnyOf {
        column: String,
        values: BTreeSet<String>,
    },
}

impl FilterSpec {
    pub fn exact_date(column: impl Into<String>, date: NaiveDate) -> Self {
        Self::ExactDate {
            column: column.into(),
            date,
        }
    }

    pub fn date_range(column: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self::DateRange {
            column: column.into(),
            start,
            end,
        }
    }

    pub fn category(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Category {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn any_of<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyOf {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The column this rule reads.
    pub fn column(&self) -> &str {
        match self {
            Self::ExactDate { column, .. }
            | Self::DateRange { column, .. }
            | Self::Category { column, .. }
            | Self::AnyOf { column, .. } => column,
        }
    }

    /// Whether the rule compares dates rather than text.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::ExactDate { .. } | Self::DateRange { .. })
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactDate { column, date } => write!(f, "{column} = {date}"),
            Self::DateRange { column, start, end } => {
                write!(f, "{column} in [{start}, {end}]")
            }
            Self::Category { column, value } => write!(f, "{column} = \"{value}\""),
            Self::AnyOf { column, values } => {
                let joined: Vec<&str> = values.iter().map(String::as_str).collect();
                write!(f, "{column} in {{{}}}", joined.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_accessor() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(FilterSpec::exact_date("Check In", date).column(), "Check In");
        assert_eq!(
            FilterSpec::any_of("Department", ["HR", "Finance"]).column(),
            "Department"
        );
    }

    #[test]
    fn test_display() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            FilterSpec::date_range("Check In", start, end).to_string(),
            "Check In in [2024-01-01, 2024-01-31]"
        );
        assert_eq!(
            FilterSpec::any_of("Department", ["HR", "Finance"]).to_string(),
            "Department in {Finance, HR}"
        );
    }
}
