//! Source files accepted by ingestion.

use std::path::{Path, PathBuf};

/// Workbook container formats that can be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Office Open XML workbook (`.xlsx`).
    Xlsx,
    /// Legacy binary workbook (`.xls`).
    Xls,
}

impl WorkbookFormat {
    /// Accepted file extensions, matched case-sensitively.
    pub const EXTENSIONS: [&'static str; 2] = ["xlsx", "xls"];

    /// Detects the format from a file name's extension.
    ///
    /// Matching is case-sensitive: `REPORT.XLSX` is not accepted.
    pub fn from_file_name(name: &str) -> Option<Self> {
        match Path::new(name).extension().and_then(|ext| ext.to_str()) {
            Some("xlsx") => Some(Self::Xlsx),
            Some("xls") => Some(Self::Xls),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
        }
    }
}

/// One spreadsheet to ingest, either on disk or already in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFile {
    /// A file on the local file system.
    Path(PathBuf),
    /// Uploaded bytes with the client-supplied file name.
    Upload { name: String, bytes: Vec<u8> },
}

impl SourceFile {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn upload(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::Upload {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Identifier used in logs and read failures.
    pub fn name(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Upload { name, .. } => name.clone(),
        }
    }

    /// Workbook format implied by the file name, if accepted.
    pub fn format(&self) -> Option<WorkbookFormat> {
        match self {
            Self::Path(path) => path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(WorkbookFormat::from_file_name),
            Self::Upload { name, .. } => WorkbookFormat::from_file_name(name),
        }
    }
}
