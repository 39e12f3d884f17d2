//! Errors surfaced by the analysis session.
//!
//! Per-file read failures and per-cell date skips are not errors; they are
//! reported through [`IngestReport`](crate::IngestReport).

use sheetjoin_ingest::FetchFailure;
use sheetjoin_output::ExportError;
use sheetjoin_report::ReportError;
use sheetjoin_transform::TransformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The folder source could not be reached; the ingestion attempt stops.
    #[error(transparent)]
    Fetch(#[from] FetchFailure),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Report(#[from] ReportError),

    /// The export call failed; the session is unaffected.
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
