//! Init configuration command.

use advisor_config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::cli::InitConfigArgs;

pub async fn run(args: InitConfigArgs, config_path: &Path) -> Result<()> {
    let path = args.path.as_deref().unwrap_or(config_path);

    if path.exists() && !args.force {
        anyhow::bail!(
            "'{}' already exists. Pass --force to overwrite it",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let rendered = AppConfig::default().to_toml()?;
    std::fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Default configuration written to {:?}", path);
    println!("Wrote {}", path.display());
    Ok(())
}
