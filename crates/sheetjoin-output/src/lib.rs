//! Export of record tables as byte payloads.
//!
//! - **CSV**: UTF-8, comma-separated, header row of column names
//! - **XLSX**: single-sheet workbook with typed number and date cells
//!
//! Absent cells are written as empty fields or empty cells. Column order
//! follows the table.

mod delimited;
mod error;
mod format;
mod xlsx;

pub use delimited::to_delimited_text;
pub use error::{ExportError, Result};
pub use format::{ExportFormat, timestamped_file_name};
pub use xlsx::{DEFAULT_SHEET_NAME, to_workbook};

use polars::prelude::DataFrame;
use sheetjoin_common::is_supported_dtype;

/// Rejects tables holding a column type that cannot be exported.
pub(crate) fn ensure_exportable(df: &DataFrame) -> Result<()> {
    for column in df.get_columns() {
        if !is_supported_dtype(column.dtype()) {
            return Err(ExportError::UnsupportedType {
                column: column.name().to_string(),
                dtype: column.dtype().to_string(),
            });
        }
    }
    Ok(())
}
