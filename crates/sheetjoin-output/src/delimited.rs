//! CSV export.

use polars::prelude::{DataFrame, PolarsResult};
use sheetjoin_common::{column_names, column_values, render_value};
use sheetjoin_model::Value;
use tracing::{debug, info_span};

use crate::ensure_exportable;
use crate::error::{ExportError, Result};

/// Serializes a table as comma-separated UTF-8 text.
///
/// The first record holds the column names. Numbers are written without
/// trailing zeros, dates as `YYYY-MM-DD` and absent cells as empty fields.
/// A table without columns produces an empty payload.
pub fn to_delimited_text(df: &DataFrame) -> Result<Vec<u8>> {
    let span = info_span!("export", format = "csv", rows = df.height());
    let _guard = span.enter();

    ensure_exportable(df)?;
    if df.width() == 0 {
        return Ok(Vec::new());
    }

    let columns: Vec<Vec<Value>> = df
        .get_columns()
        .iter()
        .map(column_values)
        .collect::<PolarsResult<_>>()?;

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(column_names(df))?;
    for row in 0..df.height() {
        writer.write_record(
            columns
                .iter()
                .map(|column| render_value(&column[row]).unwrap_or_default()),
        )?;
    }
    let bytes = writer.into_inner().map_err(|err| ExportError::Csv {
        message: err.to_string(),
    })?;
    debug!(bytes = bytes.len(), "wrote CSV payload");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_empty_table_is_empty_payload() {
        assert!(to_delimited_text(&DataFrame::empty()).unwrap().is_empty());
    }

    #[test]
    fn test_header_only() {
        let df = DataFrame::new(vec![
            Series::new("Employee".into(), Vec::<String>::new()).into_column(),
            Series::new("Amount".into(), Vec::<f64>::new()).into_column(),
        ])
        .unwrap();
        let text = String::from_utf8(to_delimited_text(&df).unwrap()).unwrap();
        assert_eq!(text, "Employee,Amount\n");
    }

    #[test]
    fn test_unsupported_column_type() {
        let df = DataFrame::new(vec![
            Series::new("Raw".into(), vec![vec![1u8, 2u8].as_slice()]).into_column(),
        ])
        .unwrap();
        let err = to_delimited_text(&df).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedType { .. }));
    }
}
