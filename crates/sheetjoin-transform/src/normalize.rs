//! Schema normalization.

use polars::prelude::{Column, DataFrame};
use sheetjoin_model::ColumnDenylist;
use tracing::debug;

use crate::error::Result;

/// Removes every column named in the denylist.
///
/// Denylisted names missing from the table are ignored. Remaining columns
/// keep their order, and applying the same denylist twice changes nothing.
pub fn normalize(df: &DataFrame, denylist: &ColumnDenylist) -> Result<DataFrame> {
    let (dropped, kept): (Vec<&Column>, Vec<&Column>) = df
        .get_columns()
        .iter()
        .partition(|column| denylist.contains(column.name().as_str()));
    if dropped.is_empty() {
        return Ok(df.clone());
    }
    debug!(
        dropped = ?dropped.iter().map(|c| c.name().as_str()).collect::<Vec<_>>(),
        "dropped denylisted columns"
    );
    let height = df.height();
    let columns: Vec<Column> = kept.into_iter().cloned().collect();
    if columns.is_empty() {
        // A table whose every column was denylisted keeps no rows either.
        debug!(rows = height, "all columns denylisted");
        return Ok(DataFrame::empty());
    }
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};
    use sheetjoin_common::column_names;

    fn bookings() -> DataFrame {
        DataFrame::new(vec![
            Series::new("Employee".into(), vec!["Ana", "Budi"]).into_column(),
            Series::new("Currency".into(), vec!["IDR", "IDR"]).into_column(),
            Series::new("Amount".into(), vec![10.0, 20.0]).into_column(),
            Series::new("Source_File".into(), vec!["a.xlsx", "b.xlsx"]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_drops_denylisted_columns_in_order() {
        let df = normalize(&bookings(), &ColumnDenylist::standard()).unwrap();
        assert_eq!(column_names(&df), vec!["Employee", "Amount"]);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_missing_denylisted_names_are_ignored() {
        let denylist = ColumnDenylist::new(["Reschedule ID"]);
        let df = normalize(&bookings(), &denylist).unwrap();
        assert!(df.equals_missing(&bookings()));
    }

    #[test]
    fn test_match_is_exact() {
        let denylist = ColumnDenylist::new(["currency"]);
        let df = normalize(&bookings(), &denylist).unwrap();
        assert_eq!(df.width(), 4);
    }
}
