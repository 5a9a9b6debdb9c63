use crate::config::Config;
use crate::error::ConfigError;
use log::debug;
use std::path::{Path, PathBuf};

/// Points at a config file to use instead of the default location
pub const CONFIG_ENV_VAR: &str = "PRESET_EXPORTER_CONFIG";
pub const ARCHIVE_ENV_VAR: &str = "PRESET_EXPORTER_ARCHIVE";
pub const OUTPUT_DIR_ENV_VAR: &str = "PRESET_EXPORTER_OUTPUT_DIR";
pub const LOG_LEVEL_ENV_VAR: &str = "PRESET_EXPORTER_LOG_LEVEL";

const APP_CONFIG_DIR: &str = "preset-exporter";
const CONFIG_FILE_NAME: &str = "config.toml";
const USER_HOME_PLACEHOLDER: &str = "{USER_HOME}";

impl Config {
    /// Loads the configuration from `explicit` or the first config file found,
    /// falling back to defaults, then applies environment overrides.
    ///
    /// Validation is left to the caller so command line values can be
    /// applied first.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match find_config_file(explicit)? {
            Some(path) => Self::from_file(&path)?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        process_user_home_placeholders(&mut config)?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading config from {}", path.display());
        let config_str = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file {}: {}", path.display(), e),
            ))
        })?;

        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(config_str)?)
    }

    /// Applies `PRESET_EXPORTER_*` values looked up through `lookup`.
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(archive) = value(ARCHIVE_ENV_VAR) {
            self.archive_path = archive;
        }
        if let Some(output_dir) = value(OUTPUT_DIR_ENV_VAR) {
            self.output_dir = output_dir;
        }
        if let Some(level) = value(LOG_LEVEL_ENV_VAR) {
            self.log_level = level;
        }
    }
}

/// Replaces `{USER_HOME}` in every path setting.
///
/// The home directory is only looked up when a placeholder is present.
pub fn process_user_home_placeholders(config: &mut Config) -> Result<(), ConfigError> {
    let has_placeholder = [
        Some(config.archive_path.as_str()),
        Some(config.output_dir.as_str()),
        config.work_dir.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|path| path.contains(USER_HOME_PLACEHOLDER));

    if !has_placeholder {
        return Ok(());
    }

    let home_dir = dirs::home_dir().ok_or(ConfigError::HomeDirError)?;
    let home_dir_str = home_dir.to_str().ok_or_else(|| {
        ConfigError::InvalidPath("Home directory path is not valid UTF-8".into())
    })?;

    replace_user_home(config, home_dir_str);
    Ok(())
}

fn replace_user_home(config: &mut Config, home: &str) {
    config.archive_path = config.archive_path.replace(USER_HOME_PLACEHOLDER, home);
    config.output_dir = config.output_dir.replace(USER_HOME_PLACEHOLDER, home);
    config.work_dir = config
        .work_dir
        .as_ref()
        .map(|path| path.replace(USER_HOME_PLACEHOLDER, home));
}

/// Default config file location: `<config dir>/preset-exporter/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
}

/// Finds the configuration file using the search strategy:
/// 1. The path given on the command line, which must exist
/// 2. Environment variable PRESET_EXPORTER_CONFIG
/// 3. The user's config directory
///
/// Returns `None` when no file is found.
pub fn find_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::InvalidPath(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(config_path);
        if path.is_file() {
            return Ok(Some(path));
        }
        debug!(
            "{} points at missing file {}, ignoring",
            CONFIG_ENV_VAR,
            path.display()
        );
    }

    Ok(default_config_path().filter(|path| path.is_file()))
}
