use clap::Parser;
use colored::Colorize;
use log::debug;
use std::process::ExitCode;

use studio_preset_exporter::cli::commands::{execute_command, CliContext};
use studio_preset_exporter::cli::{Cli, CliError, Commands};
use studio_preset_exporter::config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match cli.command {
        Commands::InitConfig { .. } => Config::default(),
        _ => Config::load(cli.config.as_deref())?,
    };
    config.apply_overrides(cli.config_overrides());

    // Initialize logging with configured level
    init_logging(&config.log_level);
    debug!("Effective configuration: {:?}", config);

    let ctx = CliContext::new(config, cli.no_color);
    execute_command(&cli.command, &ctx)
}

fn init_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
            log::LevelFilter::Info
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
