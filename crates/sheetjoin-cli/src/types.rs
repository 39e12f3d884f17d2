use std::path::PathBuf;

use sheetjoin_core::{FilterOutcome, IngestReport};
use sheetjoin_model::AggregateResult;

#[derive(Debug)]
pub struct JoinResult {
    pub report: IngestReport,
    pub outcome: FilterOutcome,
    /// Files written, empty on a dry run.
    pub exports: Vec<PathBuf>,
    pub preview_rows: usize,
}

#[derive(Debug)]
pub struct SummaryResult {
    pub report: IngestReport,
    pub outcome: FilterOutcome,
    pub aggregate: AggregateResult,
}
