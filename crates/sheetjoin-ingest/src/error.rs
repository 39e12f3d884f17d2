//! Error types for spreadsheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a single source.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// File name does not end in an accepted extension.
    #[error("unsupported file extension for {name} (expected .xlsx or .xls)")]
    UnsupportedExtension { name: String },

    /// Workbook container or sheet could not be parsed.
    #[error("failed to parse workbook: {message}")]
    Workbook { message: String },

    /// Delimited text could not be parsed.
    #[error("failed to parse delimited text: {message}")]
    CsvParse { message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::CsvParse {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// One source that could not be read.
///
/// Reported to the caller as a warning; the rest of the batch is unaffected.
#[derive(Debug, Error)]
#[error("failed to read {file}: {cause}")]
pub struct ReadFailure {
    /// Path or upload name of the source.
    pub file: String,
    #[source]
    pub cause: IngestError,
}

impl ReadFailure {
    pub fn new(file: impl Into<String>, cause: IngestError) -> Self {
        Self {
            file: file.into(),
            cause,
        }
    }
}

/// The folder source as a whole could not be reached.
///
/// Aborts the ingestion attempt that requested the fetch.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// The locator uses a scheme no fetcher handles.
    #[error("unsupported folder locator: {locator}")]
    UnsupportedLocator { locator: String },

    /// The folder could not be listed.
    #[error("folder {locator} is unreachable: {source}")]
    Unreachable {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be copied into the working directory.
    #[error("failed to copy {path} into the working directory: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The per-run working directory could not be created.
    #[error("failed to create working directory: {source}")]
    WorkingDir {
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/january.xlsx"),
        };
        assert_eq!(err.to_string(), "file not found: /data/january.xlsx");
    }

    #[test]
    fn test_read_failure_display() {
        let failure = ReadFailure::new(
            "notes.txt",
            IngestError::UnsupportedExtension {
                name: "notes.txt".to_string(),
            },
        );
        assert_eq!(
            failure.to_string(),
            "failed to read notes.txt: unsupported file extension for notes.txt (expected .xlsx or .xls)"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
