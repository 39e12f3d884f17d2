//! What happened during one ingestion run.

use std::fmt;

use sheetjoin_ingest::ReadFailure;
use sheetjoin_transform::CoercionReport;

/// One source that was read successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    /// Rows read from the source.
    pub rows: usize,
    /// Columns left after normalization.
    pub columns: usize,
}

/// A non-fatal condition worth showing to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestWarning {
    /// A source could not be read and was left out.
    Unreadable { file: String, reason: String },
    /// No source produced any rows.
    EmptyBatch,
    /// Some cells of a date column could not be read as dates.
    DatesSkipped { column: String, skipped: usize },
}

impl fmt::Display for IngestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { file, reason } => write!(f, "skipped {file}: {reason}"),
            Self::EmptyBatch => f.write_str("no rows were read from the input files"),
            Self::DatesSkipped { column, skipped } => {
                write!(f, "{skipped} value(s) in {column} are not dates and were cleared")
            }
        }
    }
}

/// Outcome of an ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Sources read successfully, in input order.
    pub files: Vec<FileSummary>,
    /// Sources that could not be read, in input order.
    pub failures: Vec<ReadFailure>,
    /// Date coercion outcome per date column present.
    pub coercion: Vec<CoercionReport>,
    /// Unified table shape.
    pub rows: usize,
    pub columns: usize,
}

impl IngestReport {
    pub fn is_empty_batch(&self) -> bool {
        self.rows == 0
    }

    /// Warnings in display order: unreadable files, empty batch, date skips.
    pub fn warnings(&self) -> Vec<IngestWarning> {
        let mut warnings: Vec<IngestWarning> = self
            .failures
            .iter()
            .map(|failure| IngestWarning::Unreadable {
                file: failure.file.clone(),
                reason: failure.cause.to_string(),
            })
            .collect();
        if self.is_empty_batch() {
            warnings.push(IngestWarning::EmptyBatch);
        }
        warnings.extend(
            self.coercion
                .iter()
                .filter(|report| report.skipped > 0)
                .map(|report| IngestWarning::DatesSkipped {
                    column: report.column.clone(),
                    skipped: report.skipped,
                }),
        );
        warnings
    }
}
