//! Validate configuration command.

use advisor_ai::RetryPolicy;
use advisor_config::load_config;
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            let policy = RetryPolicy::from(&config.retry);
            let key_present = std::env::var(&config.completion.api_key_env)
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false);

            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Log format: {}", config.logging.format);
            println!("Completion endpoint: {}", config.completion.base_url);
            println!("Model: {}", config.completion.model);
            println!("Temperature: {}", config.completion.temperature);
            println!("Max tokens: {}", config.completion.max_tokens);
            println!(
                "API key ({}): {}",
                config.completion.api_key_env,
                if key_present { "set" } else { "NOT SET" }
            );
            println!(
                "Retries: {} (attempt timeout {}s, backoff {}s doubling up to {}s)",
                policy.max_retries,
                policy.attempt_timeout.as_secs(),
                policy.backoff_base.as_secs_f64(),
                policy.max_backoff.as_secs_f64()
            );
            println!("Data directory: {}", config.data.dir);
            println!("Minimum history: {} bars", config.data.min_history_bars);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
