//! Per-cell value model.
//!
//! A record table is stored as a Polars `DataFrame`, but every component that
//! inspects individual cells works through [`Value`], which has exactly the
//! four cases a consolidated spreadsheet can hold.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell of a record table.
///
/// `Absent` is the only representation of a missing value. Empty strings read
/// from a source file are converted to `Absent` before they reach a table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    #[default]
    Absent,
}

/// The kind of a non-absent value, used to pick a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Text,
    Number,
    Date,
}

impl Value {
    /// Builds a text value, mapping empty or whitespace-only input to `Absent`.
    pub fn text(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.trim().is_empty() {
            Self::Absent
        } else {
            Self::Text(raw)
        }
    }

    /// Builds a number value, mapping non-finite input to `Absent`.
    pub fn number(value: f64) -> Self {
        if value.is_finite() {
            Self::Number(value)
        } else {
            Self::Absent
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Text(_) => Some(ValueKind::Text),
            Self::Number(_) => Some(ValueKind::Number),
            Self::Date(_) => Some(ValueKind::Date),
            Self::Absent => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}
