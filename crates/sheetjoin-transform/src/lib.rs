//! Record table transformations.
//!
//! - **normalize**: drop denylisted columns
//! - **consolidate**: union-of-columns concatenation with type reconciliation
//! - **datetime**: date parsing and per-column date coercion
//! - **filter**: AND-composed filter chain

pub mod consolidate;
pub mod datetime;
pub mod error;
pub mod filter;
pub mod normalize;

pub use consolidate::consolidate;
pub use datetime::{
    CoercedTable, CoercionReport, coerce_dates, excel_serial_to_date, parse_date,
};
pub use error::{Result, TransformError};
pub use filter::{FilterOutcome, apply_filters, matches_filter};
pub use normalize::normalize;
