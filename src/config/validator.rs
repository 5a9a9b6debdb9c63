use crate::config::Config;
use crate::error::ConfigError;
use std::path::Path;

pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

const EXPECTED_ARCHIVE_EXTENSION: &str = "song";

impl Config {
    /// Validates the configuration for logical constraints
    ///
    /// Returns warnings for problems that do not stop an export.
    pub fn validate(&self) -> Result<Vec<String>, ConfigError> {
        let mut warnings = Vec::new();

        if self.archive_path.trim().is_empty() {
            return Err(ConfigError::MissingValue("archive_path"));
        }
        if self.output_dir.trim().is_empty() {
            return Err(ConfigError::MissingValue("output_dir"));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidValue(format!(
                "Invalid log level '{}'. Must be one of: {:?}",
                self.log_level, VALID_LOG_LEVELS
            )));
        }

        let extension = self.preset_extension.trim();
        if extension.is_empty() || extension.starts_with('.') || extension.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue(format!(
                "Invalid preset extension '{}'",
                self.preset_extension
            )));
        }

        warnings.extend(self.validate_paths()?);
        Ok(warnings)
    }

    /// Checks the archive exists and the output locations are usable
    pub fn validate_paths(&self) -> Result<Vec<String>, ConfigError> {
        let mut warnings = Vec::new();

        let archive = self.archive_path();
        if !archive.exists() {
            return Err(ConfigError::InvalidPath(format!(
                "Archive does not exist: {}",
                archive.display()
            )));
        }
        if !archive.is_file() {
            return Err(ConfigError::InvalidPath(format!(
                "Archive is not a file: {}",
                archive.display()
            )));
        }
        if archive.extension().and_then(|ext| ext.to_str()) != Some(EXPECTED_ARCHIVE_EXTENSION) {
            warnings.push(format!(
                "Archive does not have a .{} extension: {}",
                EXPECTED_ARCHIVE_EXTENSION,
                archive.display()
            ));
        }

        require_directory_or_missing(&self.output_dir(), "Output")?;
        if let Some(work_dir) = self.work_dir() {
            require_directory_or_missing(&work_dir, "Work")?;
        }

        Ok(warnings)
    }
}

fn require_directory_or_missing(path: &Path, label: &str) -> Result<(), ConfigError> {
    if path.exists() && !path.is_dir() {
        return Err(ConfigError::InvalidPath(format!(
            "{} path is not a directory: {}",
            label,
            path.display()
        )));
    }
    Ok(())
}
