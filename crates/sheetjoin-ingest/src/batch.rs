//! Reading sources one by one and as a batch.

use std::borrow::Cow;

use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use crate::error::{IngestError, ReadFailure};
use crate::source::SourceFile;
use crate::workbook::read_workbook_bytes;

/// A table read from one source.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// Path or upload name of the source.
    pub name: String,
    pub data: DataFrame,
}

/// The outcome of reading a batch of sources.
#[derive(Debug, Default)]
pub struct BatchRead {
    /// Tables in source order.
    pub tables: Vec<LoadedTable>,
    /// Sources that could not be read, in source order.
    pub failures: Vec<ReadFailure>,
}

impl BatchRead {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Reads the first sheet of one source.
///
/// Fails when the file name has no accepted extension, the bytes cannot be
/// loaded, or the workbook cannot be parsed.
pub fn read_source(source: &SourceFile) -> Result<DataFrame, ReadFailure> {
    read_source_inner(source).map_err(|cause| ReadFailure::new(source.name(), cause))
}

fn read_source_inner(source: &SourceFile) -> Result<DataFrame, IngestError> {
    let format = source
        .format()
        .ok_or_else(|| IngestError::UnsupportedExtension {
            name: source.name(),
        })?;
    let bytes: Cow<'_, [u8]> = match source {
        SourceFile::Path(path) => {
            if !path.is_file() {
                return Err(IngestError::FileNotFound { path: path.clone() });
            }
            let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
                path: path.clone(),
                source: e,
            })?;
            Cow::Owned(bytes)
        }
        SourceFile::Upload { bytes, .. } => Cow::Borrowed(bytes.as_slice()),
    };
    read_workbook_bytes(&bytes, format)
}

/// Reads every source, isolating failures.
///
/// A source that fails is recorded in [`BatchRead::failures`] and skipped;
/// the remaining sources are still read.
pub fn read_batch(sources: &[SourceFile]) -> BatchRead {
    let mut batch = BatchRead::default();
    for source in sources {
        let name = source.name();
        let span = info_span!("read_file", file = %name);
        let _guard = span.enter();
        match read_source(source) {
            Ok(data) => {
                info!(rows = data.height(), columns = data.width(), "read source");
                batch.tables.push(LoadedTable { name, data });
            }
            Err(failure) => {
                warn!(error = %failure.cause, "skipping unreadable source");
                batch.failures.push(failure);
            }
        }
    }
    batch
}
