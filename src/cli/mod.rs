pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// A lightweight error type for CLI commands
pub type CliError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// preset-export - Studio One instrument preset exporter
#[derive(Parser)]
#[command(
    name = "preset-export",
    about = "Export the instrument presets of a Studio One project as .instrument files",
    version,
    long_about = r#"
preset-export - Studio One Preset Exporter

Reads a .song archive, matches every instrument device to the track it plays
on, and writes one .instrument package per device into a folder tree that
mirrors the project's folder tracks.

EXAMPLES:
  preset-export export Demo.song              # Export into ./exported
  preset-export export Demo.song -o presets   # Export into ./presets
  preset-export list Demo.song --format json  # Show what would be exported
  preset-export init-config                   # Write a default config file
"#
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export every instrument preset of a project
    Export {
        /// Project archive (uses archive_path from the config if not given)
        archive: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Unpack the archive here and keep it, instead of a temporary directory
        #[arg(long)]
        work_dir: Option<PathBuf>,
    },

    /// List the presets a project would export
    List {
        /// Project archive (uses archive_path from the config if not given)
        archive: Option<PathBuf>,

        /// Output format (table, json, csv)
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination (defaults to the user config directory)
        path: Option<PathBuf>,
    },
}

impl Cli {
    /// Command line values that take precedence over the config file
    pub fn config_overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            log_level: self.log_level.clone(),
            ..ConfigOverrides::default()
        };

        match &self.command {
            Commands::Export {
                archive,
                output_dir,
                work_dir,
            } => {
                overrides.archive_path = archive.clone();
                overrides.output_dir = output_dir.clone();
                overrides.work_dir = work_dir.clone();
            }
            Commands::List { archive, .. } => {
                overrides.archive_path = archive.clone();
            }
            Commands::InitConfig { .. } => {}
        }

        overrides
    }
}
