use log::trace;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ArchiveError;

/// One file inside a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub name: String,
    pub data: Vec<u8>,
}

impl PackageEntry {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Writes `entries` as a deflated zip at `path`, creating missing parent
/// directories and replacing an existing file.
pub fn write_package(path: &Path, entries: &[PackageEntry]) -> Result<(), ArchiveError> {
    let io_error = |source| ArchiveError::IoError {
        path: path.to_path_buf(),
        source,
    };
    let zip_error = |source| ArchiveError::ZipError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let file = File::create(path).map_err(io_error)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        trace!("Packaging {} ({} bytes)", entry.name, entry.data.len());
        zip.start_file(entry.name.as_str(), options).map_err(zip_error)?;
        zip.write_all(&entry.data).map_err(io_error)?;
    }

    zip.finish().map_err(zip_error)?;
    Ok(())
}
