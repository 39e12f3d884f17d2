//! Consolidation of normalized tables into one unified table.

use polars::prelude::DataFrame;
use sheetjoin_common::{column_from_values, column_values, find_column};
use sheetjoin_model::Value;
use tracing::{info, info_span};

use crate::error::Result;

/// Concatenates tables with union-of-columns semantics.
///
/// Columns are ordered by first appearance across the inputs; rows keep the
/// input table order, then their original order. A table lacking a column
/// contributes absent cells to it. When a column holds different value kinds
/// in different tables it becomes text, with every value rendered; a column
/// that is entirely absent in one table takes the kind of the others.
///
/// Tables without columns contribute nothing, and an empty input yields an
/// empty table.
pub fn consolidate(tables: &[DataFrame]) -> Result<DataFrame> {
    let span = info_span!("consolidate", tables = tables.len());
    let _guard = span.enter();

    let sources: Vec<&DataFrame> = tables.iter().filter(|df| df.width() > 0).collect();

    let mut names: Vec<String> = Vec::new();
    for df in &sources {
        for column in df.get_columns() {
            let name = column.name().as_str();
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
    }
    if names.is_empty() {
        return Ok(DataFrame::empty());
    }

    let total_rows: usize = sources.iter().map(|df| df.height()).sum();
    let mut columns = Vec::with_capacity(names.len());
    for name in &names {
        let mut values: Vec<Value> = Vec::with_capacity(total_rows);
        for df in &sources {
            match find_column(df, name) {
                Some(column) => values.extend(column_values(column)?),
                None => values.extend(std::iter::repeat_n(Value::Absent, df.height())),
            }
        }
        columns.push(column_from_values(name, &values)?);
    }

    let unified = DataFrame::new(columns)?;
    info!(
        rows = unified.height(),
        columns = unified.width(),
        "consolidated tables"
    );
    Ok(unified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataType, IntoColumn, NamedFrom, Series};
    use sheetjoin_common::column_names;

    #[test]
    fn test_empty_input() {
        let df = consolidate(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 0);
    }

    #[test]
    fn test_tables_without_columns_contribute_nothing() {
        let t1 = DataFrame::new(vec![
            Series::new("A".into(), vec!["x", "y"]).into_column(),
        ])
        .unwrap();
        let df = consolidate(&[DataFrame::empty(), t1]).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(column_names(&df), vec!["A"]);
    }

    #[test]
    fn test_mixed_kinds_become_text() {
        let t1 = DataFrame::new(vec![
            Series::new("Amount".into(), vec![10.0, 2.5]).into_column(),
        ])
        .unwrap();
        let t2 = DataFrame::new(vec![
            Series::new("Amount".into(), vec!["n/a"]).into_column(),
        ])
        .unwrap();
        let df = consolidate(&[t1, t2]).unwrap();
        let amount = df.column("Amount").unwrap();
        assert_eq!(amount.dtype(), &DataType::String);
        assert_eq!(
            column_values(amount).unwrap(),
            vec![Value::text("10"), Value::text("2.5"), Value::text("n/a")]
        );
    }

    #[test]
    fn test_all_absent_column_adopts_other_kind() {
        let t1 = DataFrame::new(vec![
            Series::new("Amount".into(), vec![10.0]).into_column(),
        ])
        .unwrap();
        let t2 = DataFrame::new(vec![
            Series::new("Amount".into(), vec![None::<&str>, None]).into_column(),
        ])
        .unwrap();
        let df = consolidate(&[t1, t2]).unwrap();
        let amount = df.column("Amount").unwrap();
        assert_eq!(amount.dtype(), &DataType::Float64);
        assert_eq!(amount.null_count(), 2);
    }
}
