//! Trend classification from moving averages.

use advisor_core::types::{Trend, TrendStrength};

/// Classifies trend direction and moving-average alignment.
///
/// Missing averages (too little history) never compare against a
/// placeholder: a missing SMA20 or SMA50 yields `Neutral` for both labels,
/// and a missing SMA200 caps the strength at `ModerateUp`/`ModerateDown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendClassifier;

impl TrendClassifier {
    pub fn new() -> Self {
        Self
    }

    /// `Bullish` if `close > sma20 > sma50`, `Bearish` if `close < sma20 < sma50`.
    pub fn trend(&self, close: f64, sma20: Option<f64>, sma50: Option<f64>) -> Trend {
        let (Some(sma20), Some(sma50)) = (sma20, sma50) else {
            return Trend::Neutral;
        };

        if close > sma20 && sma20 > sma50 {
            Trend::Bullish
        } else if close < sma20 && sma20 < sma50 {
            Trend::Bearish
        } else {
            Trend::Neutral
        }
    }

    pub fn strength(
        &self,
        sma20: Option<f64>,
        sma50: Option<f64>,
        sma200: Option<f64>,
    ) -> TrendStrength {
        let (Some(sma20), Some(sma50)) = (sma20, sma50) else {
            return TrendStrength::Neutral;
        };

        if sma20 > sma50 {
            match sma200 {
                Some(sma200) if sma50 > sma200 => TrendStrength::StrongUp,
                _ => TrendStrength::ModerateUp,
            }
        } else if sma20 < sma50 {
            match sma200 {
                Some(sma200) if sma50 < sma200 => TrendStrength::StrongDown,
                _ => TrendStrength::ModerateDown,
            }
        } else {
            TrendStrength::Neutral
        }
    }
}
