//! Shared utilities for sheetjoin crates.
//!
//! This crate provides the Polars helpers used across the workspace:
//! converting columns to and from [`sheetjoin_model::Value`] cells, rendering
//! values as text, and optional column lookups.

pub mod polars;
pub mod values;

// Re-export commonly used functions at crate root for convenience
pub use self::polars::{
    column_names, find_column, format_date, format_numeric, is_supported_dtype, parse_f64,
};
pub use self::values::{
    column_from_values, column_kind, column_values, date_from_days, date_to_days, render_value,
};
