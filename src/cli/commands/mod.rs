pub mod export;
pub mod init_config;
pub mod list;

use crate::cli::{CliError, Commands};
use crate::config::Config;

pub use export::ExportCommand;
pub use init_config::InitConfigCommand;
pub use list::ListCommand;

/// CLI command execution context
pub struct CliContext {
    pub config: Config,
    pub no_color: bool,
}

impl CliContext {
    pub fn new(config: Config, no_color: bool) -> Self {
        Self { config, no_color }
    }
}

/// Trait for CLI command execution
pub trait CliCommand {
    fn execute(&self, ctx: &CliContext) -> Result<(), CliError>;
}

/// Maps a parsed subcommand to the command that runs it
pub fn command_for(command: &Commands) -> Box<dyn CliCommand> {
    match command {
        Commands::Export { .. } => Box::new(ExportCommand),
        Commands::List { format, .. } => Box::new(ListCommand { format: *format }),
        Commands::InitConfig { path } => Box::new(InitConfigCommand { path: path.clone() }),
    }
}

/// Execute a CLI command with the loaded configuration
pub fn execute_command(command: &Commands, ctx: &CliContext) -> Result<(), CliError> {
    command_for(command).execute(ctx)
}
