//! CLI library components for sheetjoin.

pub mod config;
pub mod filters;
pub mod logging;
