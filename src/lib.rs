//! Studio Preset Exporter Library
//!
//! Extracts the instrument presets of a Studio One `.song` project into a
//! folder tree of standalone `.instrument` packages that mirrors the
//! project's track folders.
//!
//! The pipeline runs in four phases:
//! 1. unpack the archive ([`export::archive`])
//! 2. read the song, synth folder and track device documents ([`scan`])
//! 3. join them per instrument device and resolve folder paths ([`resolve`])
//! 4. write one package per device ([`export`])

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod resolve;
pub mod scan;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::ExportError;
pub use export::ExportedPreset;
pub use models::*;
pub use resolve::{resolve_project, ResolvedProject};

use log::{debug, warn};
use serde::Serialize;
use std::path::PathBuf;

use crate::export::archive::open_archive;
use crate::export::{export_project, EmitOptions, PresetEmitter};

/// Result of exporting one archive.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub archive: PathBuf,
    pub output_dir: PathBuf,
    pub exported: Vec<ExportedPreset>,
}

/// One preset as shown by `list`, resolved but not written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetListing {
    pub device_id: String,
    pub name: String,
    pub folders: FolderPath,
    pub class_name: String,
    pub preset_file: String,
}

pub fn export_archive(config: &Config) -> Result<ExportSummary, ExportError> {
    export_archive_with_progress::<fn(usize, usize, &ExportedPreset)>(config, None)
}

/// Runs the whole export, calling `progress_callback` with
/// `(completed, total, preset)` after each package is written.
pub fn export_archive_with_progress<F>(
    config: &Config,
    mut progress_callback: Option<F>,
) -> Result<ExportSummary, ExportError>
where
    F: FnMut(usize, usize, &ExportedPreset),
{
    debug!("Starting export_archive_with_progress");
    log_config_warnings(config)?;

    let archive = config.archive_path();
    let output_dir = config.output_dir();
    let work_dir = config.work_dir();

    let project = open_archive(&archive, work_dir.as_deref())?;
    let resolved = resolve_project(project.layout())?;

    let emitter = PresetEmitter::new(project.layout(), &output_dir, EmitOptions::from(config));
    let total = resolved.len();
    let mut completed = 0;
    let exported = export_project(&resolved, &emitter, |preset| {
        completed += 1;
        if let Some(ref mut callback) = progress_callback {
            callback(completed, total, preset);
        }
    })?;

    crate::info_fn!(
        "export_archive",
        "Exported {} of {} presets from {} into {}",
        exported.len(),
        total,
        archive.display(),
        output_dir.display()
    );

    Ok(ExportSummary {
        archive,
        output_dir,
        exported,
    })
}

/// Resolves every preset of the configured archive without writing anything.
pub fn list_presets(config: &Config) -> Result<Vec<PresetListing>, ExportError> {
    log_config_warnings(config)?;

    let work_dir = config.work_dir();
    let project = open_archive(&config.archive_path(), work_dir.as_deref())?;
    let resolved = resolve_project(project.layout())?;

    resolved
        .iter()
        .map(|preset| {
            Ok(PresetListing {
                device_id: preset.device_id().to_string(),
                name: preset.name().unwrap_or_default().to_string(),
                folders: resolved.folder_path(preset)?,
                class_name: preset.descriptor.device_base_name.clone(),
                preset_file: preset.descriptor.preset_file_name.clone(),
            })
        })
        .collect()
}

fn log_config_warnings(config: &Config) -> Result<(), ExportError> {
    for warning in config.validate()? {
        warn!("Config warning: {}", warning);
    }
    Ok(())
}
