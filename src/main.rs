//! Stock advisor CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use advisor_monitor::{setup_logging, LogFormat};
use std::path::Path;
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands that manage the config file itself do not read it up front
    let settings = match cli.command {
        Commands::ValidateConfig | Commands::InitConfig(_) => None,
        _ => Some(cli::load_settings(&cli.config)?),
    };

    // Setup logging
    let logging = settings
        .as_ref()
        .map(|(config, _)| config.logging.clone())
        .unwrap_or_default();
    let log_level = cli
        .log_level
        .as_ref()
        .map(cli::LogLevel::as_str)
        .unwrap_or(logging.level.as_str());
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        logging.format.parse().unwrap_or_default()
    };
    let _guard = setup_logging(log_level, format, logging.file.as_deref().map(Path::new))
        .context("Failed to initialise logging")?;

    match &settings {
        Some((_, true)) => debug!(path = %cli.config.display(), "Loaded configuration"),
        Some((_, false)) => warn!(path = %cli.config.display(), "Config file not found, using defaults"),
        None => {}
    }

    // Execute command
    let config = settings.map(|(config, _)| config).unwrap_or_default();
    match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::run(args, &config).await,
        Commands::Recommend(args) => cli::commands::recommend::run(args, &config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
        Commands::InitConfig(args) => cli::commands::init_config::run(args, &cli.config).await,
    }
}
