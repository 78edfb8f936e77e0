//! Analyze command implementation.

use advisor_ai::StockAdvisor;
use advisor_config::AppConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use super::market_data;
use crate::cli::report::render_text;
use crate::cli::{normalize_symbol, AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let symbol = normalize_symbol(&args.symbol);
    info!("Analyzing {}", symbol);

    let source = market_data(args.data, config)?;
    let advisor = StockAdvisor::new(Arc::new(source)).with_min_history_bars(config.data.min_history_bars);

    let report = advisor
        .analyze(&symbol)
        .await
        .with_context(|| format!("Analysis failed for {symbol}"))?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render_text(&report)),
    }

    Ok(())
}
