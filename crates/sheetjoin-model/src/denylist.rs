//! Columns removed from every source table before consolidation.

use serde::{Deserialize, Serialize};

/// Columns irrelevant to every analysis.
pub const STANDARD_DENYLIST: &[&str] = &[
    "Site (PSA)",
    "Site group Name",
    "Currency",
    "Reschedule ID",
    "Source_File",
];

/// Additional columns dropped by the extended denylist.
pub const EXTENDED_DENYLIST_ADDITIONS: &[&str] = &["No Trip SAP", "Cost Center Pekerja"];

/// An ordered, duplicate-free list of column names to drop.
///
/// Names are matched exactly (case-sensitive), the same way spreadsheet
/// headers are compared everywhere else in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnDenylist {
    columns: Vec<String>,
}

impl ColumnDenylist {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::empty().with_columns(columns)
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_DENYLIST.iter().copied())
    }

    pub fn extended() -> Self {
        Self::standard().with_columns(EXTENDED_DENYLIST_ADDITIONS.iter().copied())
    }

    /// Adds columns, skipping names already present.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for column in columns {
            let column = column.into();
            if !self.columns.contains(&column) {
                self.columns.push(column);
            }
        }
        self
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for ColumnDenylist {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_contents() {
        let denylist = ColumnDenylist::standard();
        assert_eq!(denylist.len(), 5);
        assert!(denylist.contains("Currency"));
        assert!(!denylist.contains("currency"));
        assert!(!denylist.contains("No Trip SAP"));
    }

    #[test]
    fn test_extended_adds_variant_columns() {
        let denylist = ColumnDenylist::extended();
        assert_eq!(denylist.len(), 7);
        assert!(denylist.contains("No Trip SAP"));
        assert!(denylist.contains("Cost Center Pekerja"));
    }

    #[test]
    fn test_with_columns_deduplicates() {
        let denylist = ColumnDenylist::standard().with_columns(["Currency", "Notes"]);
        assert_eq!(denylist.len(), 6);
        assert_eq!(denylist.columns().last().map(String::as_str), Some("Notes"));
    }
}
