//! # Preset Export
//!
//! Turns resolved presets into `.instrument` packages. Each package is a zip
//! holding `metainfo.xml`, `presetparts.xml` and the preset payload copied
//! out of the project archive, written to
//! `<output dir>/<folder>/.../<track name>.<extension>`.

pub mod archive;
pub mod descriptors;
pub mod package;

use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{defaults, Config};
use crate::error::{ArchiveError, ExportError};
use crate::models::{FolderPath, ResolvedPreset};
use crate::resolve::ResolvedProject;
use crate::scan::ProjectLayout;
use crate::utils::sanitize_file_name;
use crate::warn_fn;

use descriptors::{
    meta_information_xml, preset_parts_xml, DescriptorFields, META_INFORMATION_ENTRY,
    PRESET_PARTS_ENTRY,
};
use package::{write_package, PackageEntry};

/// Settings the emitter needs from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub document_creator: String,
    pub document_generator: String,
    /// File extension of the packages, without the dot
    pub extension: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            document_creator: defaults::DEFAULT_DOCUMENT_CREATOR.to_string(),
            document_generator: defaults::DEFAULT_DOCUMENT_GENERATOR.to_string(),
            extension: defaults::DEFAULT_PRESET_EXTENSION.to_string(),
        }
    }
}

impl From<&Config> for EmitOptions {
    fn from(config: &Config) -> Self {
        Self {
            document_creator: config.document_creator.clone(),
            document_generator: config.document_generator.clone(),
            extension: config.preset_extension.clone(),
        }
    }
}

/// One written package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedPreset {
    pub device_id: String,
    pub name: String,
    pub folders: FolderPath,
    pub path: PathBuf,
}

/// Writes preset packages for the presets of one project.
pub struct PresetEmitter<'a> {
    layout: &'a ProjectLayout,
    output_dir: PathBuf,
    options: EmitOptions,
}

impl<'a> PresetEmitter<'a> {
    pub fn new(layout: &'a ProjectLayout, output_dir: impl Into<PathBuf>, options: EmitOptions) -> Self {
        Self {
            layout,
            output_dir: output_dir.into(),
            options,
        }
    }

    /// Package location for a preset named `name` inside `folders`.
    pub fn output_path(&self, folders: &[String], name: &str) -> PathBuf {
        let mut path = self.output_dir.clone();
        for folder in folders {
            path.push(sanitize_file_name(folder));
        }
        path.push(format!(
            "{}.{}",
            sanitize_file_name(name),
            self.options.extension
        ));
        path
    }

    pub fn emit(
        &self,
        project: &ResolvedProject,
        preset: &ResolvedPreset,
    ) -> Result<ExportedPreset, ExportError> {
        let fields = DescriptorFields::from_preset(preset)?;
        let folders = project.folder_path(preset)?;
        let path = self.output_path(&folders, fields.title);

        let payload = self.read_payload(&preset.descriptor.preset_path)?;
        let metainfo = meta_information_xml(&fields, &self.options)
            .map_err(|source| descriptor_error(&path, source))?;
        let preset_parts =
            preset_parts_xml(&fields).map_err(|source| descriptor_error(&path, source))?;

        write_package(
            &path,
            &[
                PackageEntry::new(META_INFORMATION_ENTRY, metainfo),
                PackageEntry::new(PRESET_PARTS_ENTRY, preset_parts),
                PackageEntry::new(fields.data_file, payload),
            ],
        )?;

        debug!("Wrote {}", path.display());
        Ok(ExportedPreset {
            device_id: preset.device_id().to_string(),
            name: fields.title.to_string(),
            folders,
            path,
        })
    }

    fn read_payload(&self, preset_path: &str) -> Result<Vec<u8>, ArchiveError> {
        let path = self.layout.payload_path(preset_path)?;
        fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ArchiveError::MissingPayload(path.clone()),
            _ => ArchiveError::IoError {
                path: path.clone(),
                source,
            },
        })
    }
}

fn descriptor_error(path: &Path, source: io::Error) -> ArchiveError {
    ArchiveError::IoError {
        path: path.to_path_buf(),
        source,
    }
}

/// Emits every preset of `project`, calling `on_exported` after each one.
///
/// Presets whose track name and folder coincide map to the same file; the
/// later one replaces the earlier and a warning is logged.
pub fn export_project<F>(
    project: &ResolvedProject,
    emitter: &PresetEmitter,
    mut on_exported: F,
) -> Result<Vec<ExportedPreset>, ExportError>
where
    F: FnMut(&ExportedPreset),
{
    let mut written_paths = HashSet::new();
    let mut exported = Vec::with_capacity(project.len());

    for preset in project.iter() {
        let result = emitter.emit(project, preset)?;
        if !written_paths.insert(result.path.clone()) {
            warn_fn!(
                "export_project",
                "{} was written by more than one device; keeping '{}'",
                result.path.display(),
                result.device_id
            );
        }
        on_exported(&result);
        exported.push(result);
    }

    info!("Exported {} presets", exported.len());
    Ok(exported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_nests_folders_and_sanitizes() {
        let layout = ProjectLayout::new("/tmp/project");
        let emitter = PresetEmitter::new(&layout, "exported", EmitOptions::default());

        let path = emitter.output_path(&["Drums".to_string(), "12\" Mix".to_string()], "7\" Kick");
        assert_eq!(
            path,
            PathBuf::from("exported/Drums/12 inch Mix/7 inch Kick.instrument")
        );
    }

    #[test]
    fn test_top_level_preset_goes_to_output_root() {
        let layout = ProjectLayout::new("/tmp/project");
        let options = EmitOptions {
            extension: "preset".to_string(),
            ..EmitOptions::default()
        };
        let emitter = PresetEmitter::new(&layout, "out", options);

        assert_eq!(emitter.output_path(&[], "Lead"), PathBuf::from("out/Lead.preset"));
    }
}
