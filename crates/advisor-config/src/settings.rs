//! Configuration structures.

use advisor_ai::{CompletionConfig, ModelSettings, RetryPolicy};
use advisor_core::error::AdvisorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::SettingsError;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub completion: CompletionSettings,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub data: DataSettings,
}

impl AppConfig {
    /// Reject values no component can run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let c = &self.completion;
        if !(0.0..=2.0).contains(&c.temperature) {
            return Err(SettingsError::Invalid(format!(
                "completion.temperature must be within [0, 2], got {}",
                c.temperature
            )));
        }
        if c.max_tokens == 0 {
            return Err(SettingsError::Invalid("completion.max_tokens must be > 0".into()));
        }
        if c.model.trim().is_empty() {
            return Err(SettingsError::Invalid("completion.model must not be empty".into()));
        }
        if c.api_key_env.trim().is_empty() {
            return Err(SettingsError::Invalid("completion.api_key_env must not be empty".into()));
        }

        let r = &self.retry;
        if r.attempt_timeout_secs == 0 {
            return Err(SettingsError::Invalid("retry.attempt_timeout_secs must be > 0".into()));
        }
        for (name, value) in [
            ("retry.backoff_base_secs", r.backoff_base_secs),
            ("retry.max_backoff_secs", r.max_backoff_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid(format!("{name} must be >= 0, got {value}")));
            }
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(SettingsError::Invalid(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "stock-advisor".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Completion service configuration.
///
/// The key itself never lives in the file, only the name of the variable holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    pub api_key_env: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            api_key_env: "TOGETHER_API_KEY".to_string(),
            base_url: "https://api.together.xyz/v1".to_string(),
            model: ModelSettings::default().model,
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

impl CompletionSettings {
    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            model: self.model.clone(),
            temperature: self.temperature as f32,
            max_tokens: self.max_tokens,
        }
    }

    /// Resolve credentials from the environment.
    pub fn client_config(&self) -> Result<CompletionConfig, AdvisorError> {
        CompletionConfig::from_env(&self.api_key_env, self.base_url.clone())
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub attempt_timeout_secs: u64,
    pub backoff_base_secs: f64,
    pub max_backoff_secs: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            attempt_timeout_secs: 60,
            backoff_base_secs: 1.0,
            max_backoff_secs: 30.0,
        }
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        RetryPolicy {
            max_retries: settings.max_retries,
            attempt_timeout: Duration::from_secs(settings.attempt_timeout_secs),
            backoff_base: Duration::from_secs_f64(settings.backoff_base_secs.max(0.0)),
            max_backoff: Duration::from_secs_f64(settings.max_backoff_secs.max(0.0)),
        }
    }
}

/// Market data settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding `<SYMBOL>.csv` histories.
    pub dir: String,
    pub min_history_bars: usize,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
            min_history_bars: 200,
        }
    }
}
