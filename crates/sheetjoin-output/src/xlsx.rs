//! XLSX export.

use polars::prelude::{DataFrame, PolarsResult};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};
use sheetjoin_common::column_values;
use sheetjoin_model::Value;
use tracing::{debug, info_span};

use crate::ensure_exportable;
use crate::error::{ExportError, Result};

/// Sheet name used when the caller has no preference.
pub const DEFAULT_SHEET_NAME: &str = "Gabungan";

/// Date cell number format.
const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Serializes a table as a single-sheet workbook.
///
/// Row 1 holds the column names. Numbers are number cells, dates are date
/// cells formatted `yyyy-mm-dd`, text is string cells and absent cells are
/// left empty. Sheet names the workbook format rejects (blank, longer than 31
/// characters, or containing `[]:*?/\`) fail the call.
pub fn to_workbook(df: &DataFrame, sheet_name: &str) -> Result<Vec<u8>> {
    let span = info_span!("export", format = "xlsx", rows = df.height());
    let _guard = span.enter();

    ensure_exportable(df)?;

    let columns: Vec<Vec<Value>> = df
        .get_columns()
        .iter()
        .map(column_values)
        .collect::<PolarsResult<_>>()?;

    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format(DATE_FORMAT);
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(sheet_name)
        .map_err(|err| ExportError::SheetName {
            name: sheet_name.to_string(),
            message: err.to_string(),
        })?;

    for (idx, (column, values)) in df.get_columns().iter().zip(&columns).enumerate() {
        let col = col_num(idx)?;
        sheet.write_string(0, col, column.name().as_str())?;
        for (row_idx, value) in values.iter().enumerate() {
            let row = row_num(row_idx + 1)?;
            match value {
                Value::Text(text) => {
                    sheet.write_string(row, col, text.as_str())?;
                }
                Value::Number(number) => {
                    sheet.write_number(row, col, *number)?;
                }
                Value::Date(date) => {
                    sheet.write_datetime_with_format(row, col, date, &date_format)?;
                }
                Value::Absent => {}
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    debug!(bytes = bytes.len(), "wrote workbook payload");
    Ok(bytes)
}

fn col_num(idx: usize) -> Result<ColNum> {
    ColNum::try_from(idx).map_err(|_| ExportError::Workbook {
        message: format!("column index {idx} exceeds the sheet limit"),
    })
}

fn row_num(idx: usize) -> Result<RowNum> {
    RowNum::try_from(idx).map_err(|_| ExportError::Workbook {
        message: format!("row index {idx} exceeds the sheet limit"),
    })
}
