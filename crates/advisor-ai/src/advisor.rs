//! End-to-end advisor pipeline.

use advisor_core::error::AdvisorError;
use advisor_core::traits::MarketData;
use advisor_core::types::{
    Bar, IndicatorSnapshot, Quote, Recommendation, RecommendationRequest, Signal, Symbol,
};
use advisor_indicators::{IndicatorEngine, SignalGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::orchestrator::{RecommendationFailure, RecommendationOrchestrator};

/// Everything produced for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub symbol: Symbol,
    pub quote: Quote,
    pub indicators: IndicatorSnapshot,
    pub signals: Vec<Signal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
}

impl AnalysisReport {
    pub fn request(&self) -> RecommendationRequest {
        RecommendationRequest {
            symbol: self.symbol.clone(),
            quote: self.quote.clone(),
            indicators: self.indicators.clone(),
            signals: self.signals.clone(),
        }
    }
}

/// Symbol in, report out.
///
/// Market data failures surface as `DataUnavailable` and never consume the
/// orchestrator's retry budget.
pub struct StockAdvisor {
    market_data: Arc<dyn MarketData>,
    engine: IndicatorEngine,
    signals: SignalGenerator,
    orchestrator: Option<RecommendationOrchestrator>,
    min_history_bars: usize,
}

impl StockAdvisor {
    pub fn new(market_data: Arc<dyn MarketData>) -> Self {
        Self {
            market_data,
            engine: IndicatorEngine::default(),
            signals: SignalGenerator::default(),
            orchestrator: None,
            min_history_bars: 200,
        }
    }

    pub fn with_engine(mut self, engine: IndicatorEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_signal_generator(mut self, signals: SignalGenerator) -> Self {
        self.signals = signals;
        self
    }

    pub fn with_orchestrator(mut self, orchestrator: RecommendationOrchestrator) -> Self {
        self.orchestrator = Some(orchestrator);
        self
    }

    /// Histories shorter than this are analysed but logged as incomplete.
    pub fn with_min_history_bars(mut self, bars: usize) -> Self {
        self.min_history_bars = bars;
        self
    }

    /// Indicators and signals only; the completion service is not called.
    pub async fn analyze(&self, raw_symbol: &str) -> Result<AnalysisReport, AdvisorError> {
        let symbol = Symbol::parse(raw_symbol)?;

        let quote = self.market_data.quote(&symbol).await?;
        let bars = self.market_data.daily_bars(&symbol).await?;
        // Sources are not trusted to have checked their own bars.
        Bar::validate_series(&bars)?;
        if bars.len() < self.min_history_bars {
            warn!(
                symbol = %symbol,
                bars = bars.len(),
                wanted = self.min_history_bars,
                "Short history, long-period averages will be unavailable"
            );
        }

        let indicators = self.engine.snapshot(&bars)?;
        let signals = self.signals.generate(&indicators);
        info!(
            symbol = %symbol,
            source = self.market_data.name(),
            trend = indicators.trend.as_str(),
            signals = signals.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            symbol,
            quote,
            indicators,
            signals,
            recommendation: None,
        })
    }

    /// Full pipeline including the recommendation.
    pub async fn recommend(
        &self,
        raw_symbol: &str,
        cancel: &CancelToken,
    ) -> Result<AnalysisReport, RecommendationFailure> {
        let orchestrator = self.orchestrator.as_ref().ok_or_else(|| {
            AdvisorError::Configuration("no completion service configured".to_string())
        })?;

        let mut report = self.analyze(raw_symbol).await?;
        let recommendation = orchestrator
            .recommend_with_cancel(&report.request(), cancel)
            .await?;
        report.recommendation = Some(recommendation);
        Ok(report)
    }
}
