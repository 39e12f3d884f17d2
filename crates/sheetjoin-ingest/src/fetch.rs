//! Folder fetching into a scoped working directory.
//!
//! A folder locator names a remote or local collection of workbooks. The
//! fetcher copies the collection into a [`WorkingDir`] owned by the caller;
//! the directory is removed when the fetched folder is dropped, so runs never
//! see each other's files.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::discovery::list_workbook_files;
use crate::error::{FetchFailure, IngestError};
use crate::source::SourceFile;

/// Populates a working directory from a folder locator.
pub trait FolderFetcher {
    /// Copies the folder's files into `dest` and returns their new paths.
    fn fetch(&self, locator: &str, dest: &Path) -> Result<Vec<PathBuf>, FetchFailure>;
}

/// Fetches from a directory on the local file system.
///
/// Accepts a plain path or a `file://` URL. Other URL schemes are rejected
/// with [`FetchFailure::UnsupportedLocator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFolderFetcher;

impl LocalFolderFetcher {
    fn resolve(locator: &str) -> Result<PathBuf, FetchFailure> {
        if let Some(path) = locator.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if locator.contains("://") {
            return Err(FetchFailure::UnsupportedLocator {
                locator: locator.to_string(),
            });
        }
        Ok(PathBuf::from(locator))
    }
}

impl FolderFetcher for LocalFolderFetcher {
    fn fetch(&self, locator: &str, dest: &Path) -> Result<Vec<PathBuf>, FetchFailure> {
        let source_dir = Self::resolve(locator)?;
        let files = list_workbook_files(&source_dir).map_err(|err| FetchFailure::Unreachable {
            locator: locator.to_string(),
            source: match err {
                IngestError::DirectoryRead { source, .. } => source,
                other => std::io::Error::new(std::io::ErrorKind::NotFound, other.to_string()),
            },
        })?;

        let mut copied = Vec::with_capacity(files.len());
        for file in files {
            let Some(name) = file.file_name() else {
                continue;
            };
            let target = dest.join(name);
            std::fs::copy(&file, &target).map_err(|source| FetchFailure::Copy {
                path: file.clone(),
                source,
            })?;
            debug!(file = %file.display(), "copied into working directory");
            copied.push(target);
        }
        Ok(copied)
    }
}

/// A per-run scratch directory, removed on drop.
#[derive(Debug)]
pub struct WorkingDir {
    dir: TempDir,
}

impl WorkingDir {
    pub fn new() -> Result<Self, FetchFailure> {
        let dir = tempfile::Builder::new()
            .prefix("sheetjoin-")
            .tempdir()
            .map_err(|source| FetchFailure::WorkingDir { source })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Files fetched for one ingestion run, together with the directory that
/// holds them.
#[derive(Debug)]
pub struct FetchedFolder {
    pub work_dir: WorkingDir,
    pub files: Vec<PathBuf>,
}

impl FetchedFolder {
    /// Sources for the fetched files, in file-name order.
    pub fn sources(&self) -> Vec<SourceFile> {
        self.files.iter().cloned().map(SourceFile::Path).collect()
    }
}

/// Fetches a folder into a fresh working directory.
///
/// Only accepted workbook files in the working directory are returned,
/// sorted by file name.
pub fn fetch_folder(
    fetcher: &dyn FolderFetcher,
    locator: &str,
) -> Result<FetchedFolder, FetchFailure> {
    let work_dir = WorkingDir::new()?;
    fetcher.fetch(locator, work_dir.path())?;
    let files = list_workbook_files(work_dir.path()).map_err(|err| FetchFailure::Unreachable {
        locator: locator.to_string(),
        source: std::io::Error::other(err.to_string()),
    })?;
    info!(locator, files = files.len(), "fetched folder");
    Ok(FetchedFolder { work_dir, files })
}
