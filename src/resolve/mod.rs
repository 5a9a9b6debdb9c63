//! Cross-document resolution: joining the three project tables into one
//! [`ResolvedPreset`] per device, and locating each preset's folder.

pub mod folder_path;
pub mod joiner;

use log::info;
use std::collections::BTreeMap;

use crate::error::{ExportError, JoinError};
use crate::models::{FolderPath, ResolvedPreset, SongTable};
use crate::scan::{ProjectLayout, ProjectTables};

pub use folder_path::resolve_folder_path;
pub use joiner::join_tables;

/// All presets of one project, together with the song table their folder
/// paths are resolved against.
#[derive(Debug, Clone)]
pub struct ResolvedProject {
    pub song: SongTable,
    pub presets: BTreeMap<String, ResolvedPreset>,
}

impl ResolvedProject {
    pub fn from_tables(tables: ProjectTables) -> Result<Self, JoinError> {
        let presets = join_tables(&tables.song, &tables.synth_folder, &tables.track_devices)?;
        Ok(Self {
            song: tables.song,
            presets,
        })
    }

    pub fn folder_path(&self, preset: &ResolvedPreset) -> Result<FolderPath, ExportError> {
        resolve_folder_path(&preset.fields, &self.song)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedPreset> {
        self.presets.values()
    }
}

/// Reads the documents under `layout` and joins them.
pub fn resolve_project(layout: &ProjectLayout) -> Result<ResolvedProject, ExportError> {
    let tables = ProjectTables::load(layout)?;
    let project = ResolvedProject::from_tables(tables)?;
    info!("Resolved {} instrument presets", project.len());
    Ok(project)
}
