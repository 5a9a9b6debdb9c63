use std::path::{Path, PathBuf};

use crate::cli::commands::{CliCommand, CliContext};
use crate::cli::output::{MessageType, OutputFormatter};
use crate::cli::{CliError, OutputFormat};
use crate::config::defaults::generate_default_config;
use crate::config::loader::default_config_path;

/// Writes a default config file
pub struct InitConfigCommand {
    pub path: Option<PathBuf>,
}

impl CliCommand for InitConfigCommand {
    fn execute(&self, ctx: &CliContext) -> Result<(), CliError> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => default_config_path().ok_or("Could not get config directory")?,
        };

        write_default_config(&path)?;
        OutputFormatter::new(OutputFormat::Table, ctx.no_color).print_message(
            &format!("Wrote default config to {}", path.display()),
            MessageType::Success,
        );
        Ok(())
    }
}

/// Writes the default config to `path`, refusing to replace an existing file
pub fn write_default_config(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()).into());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_default_config())?;
    Ok(())
}
