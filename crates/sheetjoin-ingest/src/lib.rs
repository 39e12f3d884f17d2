//! Spreadsheet ingestion utilities.
//!
//! This crate loads source spreadsheets into Polars DataFrames whose cells
//! follow the [`sheetjoin_model::Value`] model.
//!
//! # Features
//!
//! - **Workbook Loading**: Read the first sheet of `.xlsx` / `.xls` files from a
//!   path or from uploaded bytes
//! - **Batch Reading**: Read many files, isolating each file's failure
//! - **Folder Discovery**: List accepted workbook files in a directory
//! - **Folder Fetch**: Populate a scoped working directory from a folder locator
//! - **Delimited Text**: Read CSV bytes with the same header and cell rules
//!
//! # Example
//!
//! ```ignore
//! use sheetjoin_ingest::{SourceFile, read_batch};
//!
//! let sources = vec![
//!     SourceFile::path("bookings/january.xlsx"),
//!     SourceFile::upload("february.xlsx", bytes),
//! ];
//! let batch = read_batch(&sources);
//! for failure in &batch.failures {
//!     eprintln!("warning: {failure}");
//! }
//! ```

mod batch;
mod delimited;
mod discovery;
mod error;
mod fetch;
mod source;
mod table;
mod workbook;

// === Error Types ===
pub use error::{FetchFailure, IngestError, ReadFailure, Result};

// === Sources ===
pub use source::{SourceFile, WorkbookFormat};

// === Reading ===
pub use batch::{BatchRead, LoadedTable, read_batch, read_source};
pub use delimited::read_delimited;
pub use table::{normalize_header, table_from_grid, unique_headers};
pub use workbook::read_workbook_bytes;

// === Discovery and Fetch ===
pub use discovery::list_workbook_files;
pub use fetch::{FetchedFolder, FolderFetcher, LocalFolderFetcher, WorkingDir, fetch_folder};
