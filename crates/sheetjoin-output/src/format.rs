//! Export formats and suggested file names.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Byte payload formats a table can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(ExportError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

/// Builds a download name of the form `<stem>_<YYYYMMDD_HHMMSS>.<ext>`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sheetjoin_output::{ExportFormat, timestamped_file_name};
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .unwrap()
///     .and_hms_opt(14, 5, 7)
///     .unwrap();
/// assert_eq!(
///     timestamped_file_name("combined", ExportFormat::Xlsx, at),
///     "combined_20240309_140507.xlsx"
/// );
/// ```
pub fn timestamped_file_name(stem: &str, format: ExportFormat, at: NaiveDateTime) -> String {
    format!(
        "{stem}_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}
