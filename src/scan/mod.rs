//! # Project Document Readers
//!
//! Reduces the three XML documents of an extracted `.song` archive into
//! lookup tables:
//!
//! - [`song`]: `Song/song.xml` → [`SongTable`]
//! - [`synth_folder`]: `Devices/audiosynthfolder.xml` → [`SynthFolderTable`]
//! - [`track_device`]: `Devices/musictrackdevice.xml` → [`TrackDeviceTable`]
//!
//! The documents are independent, so [`ProjectTables::load`] reads them on
//! separate threads and only combines the results once all three are built.

pub mod song;
pub mod synth_folder;
pub mod track_device;

use log::info;
use std::path::{Component, Path, PathBuf};
use std::thread::{self, ScopedJoinHandle};

use crate::error::{ArchiveError, ExportError};
use crate::models::{SongTable, SynthFolderTable, TrackDeviceTable};

pub use song::read_song_table;
pub use synth_folder::read_synth_folder_table;
pub use track_device::read_track_device_table;

/// Locations of the documents inside an extracted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn song_document(&self) -> PathBuf {
        self.root.join(song::SONG_DOCUMENT)
    }

    pub fn synth_folder_document(&self) -> PathBuf {
        self.root.join(synth_folder::SYNTH_FOLDER_DOCUMENT)
    }

    pub fn track_device_document(&self) -> PathBuf {
        self.root.join(track_device::TRACK_DEVICE_DOCUMENT)
    }

    /// Resolves a `presetPath` (relative to the archive root). Paths that are
    /// absolute or climb with `..` are rejected.
    pub fn payload_path(&self, preset_path: &str) -> Result<PathBuf, ArchiveError> {
        let relative = Path::new(preset_path);
        let stays_inside = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if !stays_inside {
            return Err(ArchiveError::UnsafePresetPath(preset_path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

/// The three tables of one project.
#[derive(Debug, Clone)]
pub struct ProjectTables {
    pub song: SongTable,
    pub synth_folder: SynthFolderTable,
    pub track_devices: TrackDeviceTable,
}

impl ProjectTables {
    pub fn load(layout: &ProjectLayout) -> Result<Self, ExportError> {
        info!("Reading project documents from {}", layout.root().display());

        let song_path = layout.song_document();
        let synth_folder_path = layout.synth_folder_document();
        let track_device_path = layout.track_device_document();

        thread::scope(|scope| -> Result<Self, ExportError> {
            let song = scope.spawn(|| read_song_table(&song_path));
            let synth_folder = scope.spawn(|| read_synth_folder_table(&synth_folder_path));
            let track_devices = scope.spawn(|| read_track_device_table(&track_device_path));

            Ok(Self {
                song: join_reader(song)?,
                synth_folder: join_reader(synth_folder)?,
                track_devices: join_reader(track_devices)?,
            })
        })
    }
}

fn join_reader<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}
