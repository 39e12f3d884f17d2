//! Error types for table export.

use thiserror::Error;

/// Errors that fail a single export call.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The table holds a column type outside text, number, date and boolean.
    #[error("column {column} has unsupported type {dtype} for export")]
    UnsupportedType { column: String, dtype: String },

    /// Sheet name rejected by the workbook writer.
    #[error("invalid sheet name {name:?}: {message}")]
    SheetName { name: String, message: String },

    /// Unknown export format name.
    #[error("unknown export format {name:?} (expected csv or xlsx)")]
    UnknownFormat { name: String },

    /// CSV serialization failed.
    #[error("CSV export failed: {message}")]
    Csv { message: String },

    /// Workbook serialization failed.
    #[error("workbook export failed: {message}")]
    Workbook { message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ExportError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv {
            message: err.to_string(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
