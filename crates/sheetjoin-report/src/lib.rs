//! Summary metrics for record tables.
//!
//! Produces an [`AggregateResult`](sheetjoin_model::AggregateResult) with
//! row/column counts, distinct counts, amount totals and monthly and
//! per-category rollups. Configured columns that are missing from the table
//! yield zero or an omitted metric, never an error.

mod error;
mod summary;

pub use error::{ReportError, Result};
pub use summary::{month_key, summarize};
