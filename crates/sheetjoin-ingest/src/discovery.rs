//! Workbook file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};
use crate::source::WorkbookFormat;

/// Lists accepted workbook files in a directory, sorted by file name.
///
/// Only regular files directly in `dir` are considered; extensions are
/// matched case-sensitively.
pub fn list_workbook_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let accepted = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(WorkbookFormat::from_file_name)
            .is_some();
        if accepted {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_list_workbook_files() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("b.xlsx")).unwrap();
        File::create(dir.path().join("a.xls")).unwrap();
        File::create(dir.path().join("C.XLSX")).unwrap();
        File::create(dir.path().join("notes.csv")).unwrap();
        std::fs::create_dir(dir.path().join("nested.xlsx")).unwrap();

        let files = list_workbook_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.xls", "b.xlsx"]);
    }

    #[test]
    fn test_missing_directory() {
        let err = list_workbook_files(Path::new("/nonexistent/bookings")).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }
}
