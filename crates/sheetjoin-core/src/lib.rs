//! Analysis session over a batch of spreadsheets.
//!
//! [`AnalysisSession`] is the one pipeline every front-end calls. It exposes
//! four entry points:
//!
//! - **ingest**: read, normalize, consolidate and date-coerce a batch
//!   (uploaded files, local paths, or a fetched folder)
//! - **filter**: derive a filtered view of the unified table
//! - **summarize**: compute an aggregate result for a view
//! - **export**: serialize a view as CSV or XLSX bytes

mod error;
mod ingest_report;
mod session;

pub use error::{CoreError, Result};
pub use ingest_report::{FileSummary, IngestReport, IngestWarning};
pub use session::AnalysisSession;

// Re-exported for front-ends so they depend on one crate.
pub use sheetjoin_ingest::{FetchFailure, FolderFetcher, LocalFolderFetcher, ReadFailure, SourceFile};
pub use sheetjoin_output::{DEFAULT_SHEET_NAME, ExportFormat, timestamped_file_name};
pub use sheetjoin_transform::{CoercionReport, FilterOutcome};
