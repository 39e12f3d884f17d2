//! The analysis session.

use std::time::Instant;

use polars::prelude::DataFrame;
use sheetjoin_ingest::{
    FolderFetcher, IngestError, ReadFailure, SourceFile, fetch_folder, read_batch,
};
use sheetjoin_model::{AggregateResult, FilterSpec, PipelineOptions};
use sheetjoin_output::{ExportFormat, to_delimited_text, to_workbook};
use sheetjoin_report::summarize;
use sheetjoin_transform::{FilterOutcome, apply_filters, coerce_dates, consolidate, normalize};
use tracing::{info, info_span, warn};

use crate::error::Result;
use crate::ingest_report::{FileSummary, IngestReport};

/// Owns the unified table of one ingestion run and derives views from it.
///
/// Each ingestion replaces the unified table. Filtered views are copies, so
/// the unified table is never modified after ingestion.
#[derive(Debug)]
pub struct AnalysisSession {
    options: PipelineOptions,
    unified: DataFrame,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}

impl AnalysisSession {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            unified: DataFrame::empty(),
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// The table produced by the latest ingestion.
    pub fn unified(&self) -> &DataFrame {
        &self.unified
    }

    /// Reads, normalizes and consolidates a batch, then coerces date columns.
    ///
    /// Unreadable sources are reported and left out. An empty batch is not an
    /// error: the unified table is empty and the report carries a warning.
    pub fn ingest(&mut self, sources: &[SourceFile]) -> Result<IngestReport> {
        let span = info_span!("ingest", files = sources.len());
        let _guard = span.enter();
        let started = Instant::now();

        let batch = read_batch(sources);
        let mut report = IngestReport {
            failures: batch.failures,
            ..IngestReport::default()
        };

        let mut tables = Vec::with_capacity(batch.tables.len());
        for loaded in batch.tables {
            match normalize(&loaded.data, &self.options.denylist) {
                Ok(table) => {
                    report.files.push(FileSummary {
                        name: loaded.name,
                        rows: loaded.data.height(),
                        columns: table.width(),
                    });
                    tables.push(table);
                }
                Err(err) => {
                    warn!(file = %loaded.name, error = %err, "skipping source that failed normalization");
                    report.failures.push(ReadFailure::new(
                        loaded.name,
                        IngestError::DataFrame {
                            message: err.to_string(),
                        },
                    ));
                }
            }
        }

        let unified = consolidate(&tables)?;
        let coerced = coerce_dates(&unified, &self.options.date_columns, self.options.date_order)?;
        self.unified = coerced.data;
        report.coercion = coerced.reports;
        report.rows = self.unified.height();
        report.columns = self.unified.width();

        if report.is_empty_batch() {
            warn!("no rows were read from the input files");
        }
        info!(
            rows = report.rows,
            columns = report.columns,
            failures = report.failures.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "ingestion complete"
        );
        Ok(report)
    }

    /// Fetches a folder into a scoped working directory and ingests its files.
    ///
    /// The working directory is removed before this returns. A folder that
    /// cannot be reached fails with [`CoreError::Fetch`](crate::CoreError::Fetch)
    /// and leaves the previous unified table in place.
    pub fn ingest_folder(
        &mut self,
        fetcher: &dyn FolderFetcher,
        locator: &str,
    ) -> Result<IngestReport> {
        let fetched = fetch_folder(fetcher, locator)?;
        self.ingest(&fetched.sources())
    }

    /// Applies a filter chain to the unified table.
    pub fn filter(&self, specs: &[FilterSpec]) -> Result<FilterOutcome> {
        Ok(apply_filters(&self.unified, specs)?)
    }

    /// Applies the filters from the session options.
    pub fn filter_default(&self) -> Result<FilterOutcome> {
        self.filter(&self.options.filters)
    }

    /// Summarizes a view with the session's summary options.
    pub fn summarize(&self, view: &DataFrame) -> Result<AggregateResult> {
        Ok(summarize(view, &self.options.summary)?)
    }

    /// Serializes a view. `sheet_name` is only used for workbooks.
    pub fn export(&self, view: &DataFrame, format: ExportFormat, sheet_name: &str) -> Result<Vec<u8>> {
        let bytes = match format {
            ExportFormat::Csv => to_delimited_text(view)?,
            ExportFormat::Xlsx => to_workbook(view, sheet_name)?,
        };
        info!(%format, bytes = bytes.len(), "exported view");
        Ok(bytes)
    }
}
