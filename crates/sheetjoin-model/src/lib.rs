//! Sheetjoin data model definitions.
//!
//! Types shared by every stage of the consolidation pipeline: the per-cell
//! [`Value`] view of a record table, declarative [`FilterSpec`] rules, the
//! [`ColumnDenylist`], pipeline options and the [`AggregateResult`] produced
//! by summarization.

pub mod aggregate;
pub mod denylist;
pub mod filter;
pub mod options;
pub mod value;

pub use aggregate::{AggregateResult, DistinctCount, GroupedPoint, Metric};
pub use denylist::{ColumnDenylist, EXTENDED_DENYLIST_ADDITIONS, STANDARD_DENYLIST};
pub use filter::FilterSpec;
pub use options::{DateOrder, PipelineOptions, SummaryOptions};
pub use value::{Value, ValueKind};
