//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, CompletionSettings, DataSettings, LoggingConfig, RetrySettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Configuration failures.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Load configuration from file and environment.
///
/// `ADVISOR__<SECTION>__<KEY>` variables override the file, e.g.
/// `ADVISOR__RETRY__MAX_RETRIES=5`. The result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("ADVISOR")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}
