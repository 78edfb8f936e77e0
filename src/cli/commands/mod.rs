//! CLI command implementations.

pub mod analyze;
pub mod init_config;
pub mod recommend;
pub mod validate;

use advisor_config::AppConfig;
use advisor_data::CsvMarketData;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// CSV source from `--data`, else `data.dir` from the config.
fn market_data(data: Option<PathBuf>, config: &AppConfig) -> Result<CsvMarketData> {
    let dir = data.unwrap_or_else(|| PathBuf::from(&config.data.dir));
    CsvMarketData::new(&dir).with_context(|| {
        format!(
            "Data directory '{}' is not usable. Provide a directory of CSV files with --data (e.g. --data ./data)",
            dir.display()
        )
    })
}
