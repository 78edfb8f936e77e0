//! Recommend command implementation.

use advisor_ai::{cancellation, OpenAiCompatibleClient, RecommendationOrchestrator, RetryPolicy, StockAdvisor};
use advisor_config::AppConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use super::market_data;
use crate::cli::report::render_text;
use crate::cli::{normalize_symbol, OutputFormat, RecommendArgs};

pub async fn run(args: RecommendArgs, config: &AppConfig) -> Result<()> {
    let symbol = normalize_symbol(&args.symbol);

    // Missing credentials fail here, before any data is read or request sent
    let policy = RetryPolicy::from(&config.retry);
    let client_config = config
        .completion
        .client_config()
        .context("Completion service is not configured")?
        .with_request_timeout(policy.attempt_timeout);
    let client = OpenAiCompatibleClient::new(client_config)?;
    let orchestrator =
        RecommendationOrchestrator::new(Arc::new(client), policy, config.completion.model_settings());

    let source = market_data(args.data, config)?;
    let advisor = StockAdvisor::new(Arc::new(source))
        .with_min_history_bars(config.data.min_history_bars)
        .with_orchestrator(orchestrator);

    let (handle, token) = cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling request");
            handle.cancel();
        }
    });

    info!("Requesting recommendation for {} (model {})", symbol, config.completion.model);
    let report = advisor
        .recommend(&symbol, &token)
        .await
        .with_context(|| format!("Recommendation failed for {symbol}"))?;

    let json = serde_json::to_string_pretty(&report)?;
    match args.output {
        OutputFormat::Json => println!("{json}"),
        OutputFormat::Text => print!("{}", render_text(&report)),
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        std::fs::write(save_path, &json)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Report saved to {:?}", save_path);
    }

    Ok(())
}
