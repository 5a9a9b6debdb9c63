use log::{debug, info};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

use crate::error::ArchiveError;
use crate::scan::ProjectLayout;

/// Where an archive was unpacked to.
#[derive(Debug)]
pub enum WorkDir {
    /// Removed when the project is dropped
    Temporary(TempDir),
    /// Configured by the user and left in place
    Kept(PathBuf),
}

impl WorkDir {
    pub fn path(&self) -> &Path {
        match self {
            WorkDir::Temporary(dir) => dir.path(),
            WorkDir::Kept(path) => path,
        }
    }
}

/// An unpacked `.song` archive.
#[derive(Debug)]
pub struct ExtractedProject {
    work_dir: WorkDir,
    layout: ProjectLayout,
}

impl ExtractedProject {
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn work_dir(&self) -> &WorkDir {
        &self.work_dir
    }
}

/// Unpacks `archive` into `work_dir`, or into a temporary directory when no
/// work directory is given.
pub fn open_archive(archive: &Path, work_dir: Option<&Path>) -> Result<ExtractedProject, ArchiveError> {
    let work_dir = match work_dir {
        Some(path) => {
            fs::create_dir_all(path).map_err(|source| ArchiveError::IoError {
                path: path.to_path_buf(),
                source,
            })?;
            WorkDir::Kept(path.to_path_buf())
        }
        None => {
            let dir = tempfile::Builder::new()
                .prefix("preset-export-")
                .tempdir()
                .map_err(|source| ArchiveError::IoError {
                    path: std::env::temp_dir(),
                    source,
                })?;
            WorkDir::Temporary(dir)
        }
    };

    extract_archive(archive, work_dir.path())?;
    let layout = ProjectLayout::new(work_dir.path());

    Ok(ExtractedProject { work_dir, layout })
}

pub fn extract_archive(archive: &Path, destination: &Path) -> Result<(), ArchiveError> {
    if !archive.is_file() {
        return Err(ArchiveError::NotFound(archive.to_path_buf()));
    }

    info!(
        "Extracting {} into {}",
        archive.display(),
        destination.display()
    );

    let file = File::open(archive).map_err(|source| ArchiveError::IoError {
        path: archive.to_path_buf(),
        source,
    })?;
    let mut zip = ZipArchive::new(file).map_err(|source| ArchiveError::ZipError {
        path: archive.to_path_buf(),
        source,
    })?;

    debug!("Archive contains {} entries", zip.len());
    zip.extract(destination)
        .map_err(|source| ArchiveError::ZipError {
            path: archive.to_path_buf(),
            source,
        })
}
