pub mod defaults;
pub mod loader;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::{DEFAULT_LOG_LEVEL, DEFAULT_OUTPUT_DIR, DEFAULT_PRESET_EXTENSION};
pub use loader::{find_config_file, CONFIG_ENV_VAR};
pub use validator::VALID_LOG_LEVELS;

/// Configuration for the preset exporter
///
/// Values are layered: built-in defaults, then the config file, then
/// `PRESET_EXPORTER_*` environment variables, then command line flags.
///
/// # Example Configuration File
/// ```toml
/// # Studio One project archive to export from
/// archive_path = "{USER_HOME}/Music/Songs/Demo/Demo.song"
///
/// # Directory the preset tree is written to
/// output_dir = "exported"
///
/// # Directory the archive is unpacked into (optional, defaults to a temp dir)
/// # work_dir = "{USER_HOME}/.cache/preset-exporter"
///
/// # Logging level: error, warn, info, debug, trace
/// log_level = "info"
///
/// document_creator = "preset-exporter"
/// document_generator = "Studio One/6.0.0.89694"
/// preset_extension = "instrument"
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Project archive (`.song`) to export from
    #[serde(default)]
    pub archive_path: String,
    /// Root of the exported preset tree
    #[serde(default = "defaults::default_output_dir")]
    pub output_dir: String,
    /// Where the archive is unpacked; a temporary directory when unset
    #[serde(default)]
    pub work_dir: Option<String>,
    /// Logging level
    #[serde(default = "defaults::default_log_level")]
    pub log_level: String,
    #[serde(default = "defaults::default_document_creator")]
    pub document_creator: String,
    #[serde(default = "defaults::default_document_generator")]
    pub document_generator: String,
    /// Package extension, without the dot
    #[serde(default = "defaults::default_preset_extension")]
    pub preset_extension: String,
}

/// Values given on the command line. `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub archive_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn archive_path(&self) -> PathBuf {
        PathBuf::from(&self.archive_path)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    pub fn work_dir(&self) -> Option<PathBuf> {
        self.work_dir
            .as_deref()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Applies command line values on top of the loaded configuration
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(archive) = overrides.archive_path {
            self.archive_path = archive.to_string_lossy().into_owned();
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir.to_string_lossy().into_owned();
        }
        if let Some(work_dir) = overrides.work_dir {
            self.work_dir = Some(work_dir.to_string_lossy().into_owned());
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("archive_path = 'demo.song'").unwrap();
        assert_eq!(config.archive_path, "demo.song");
        assert_eq!(config.output_dir, DEFAULT_OUTPUT_DIR);
        assert_eq!(config.preset_extension, DEFAULT_PRESET_EXTENSION);
        assert_eq!(config.work_dir(), None);
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let mut config = Config {
            archive_path: "a.song".into(),
            output_dir: "from-file".into(),
            ..Config::default()
        };

        config.apply_overrides(ConfigOverrides {
            output_dir: Some(PathBuf::from("from-cli")),
            ..ConfigOverrides::default()
        });

        assert_eq!(config.archive_path, "a.song");
        assert_eq!(config.output_dir, "from-cli");
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_blank_work_dir_means_temporary() {
        let config = Config {
            work_dir: Some("  ".into()),
            ..Config::default()
        };
        assert_eq!(config.work_dir(), None);
    }
}
