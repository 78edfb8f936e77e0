//! CLI definitions.

pub mod commands;
pub mod report;

use advisor_config::{load_config, AppConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "advisor")]
#[command(author, version, about = "Technical analysis and AI-assisted stock recommendations")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides logging.level from the config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute indicators and signals for a symbol
    Analyze(AnalyzeArgs),
    /// Full analysis plus an AI recommendation
    Recommend(RecommendArgs),
    /// Validate configuration
    ValidateConfig,
    /// Write the default configuration file
    InitConfig(InitConfigArgs),
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Ticker symbol (1-5 letters)
    pub symbol: String,

    /// Directory containing <SYMBOL>.csv daily histories
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct RecommendArgs {
    /// Ticker symbol (1-5 letters)
    pub symbol: String,

    /// Directory containing <SYMBOL>.csv daily histories
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Save the report as JSON
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct InitConfigArgs {
    /// Destination (defaults to --config)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Load the config file, falling back to defaults when it does not exist.
///
/// The flag is true when the file was read.
pub fn load_settings(path: &Path) -> Result<(AppConfig, bool)> {
    if !path.exists() {
        let config = AppConfig::default();
        return Ok((config, false));
    }
    let config = load_config(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    Ok((config, true))
}

/// Upper-case user input before symbol validation.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
