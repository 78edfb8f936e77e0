//! Indicator snapshot types.

use serde::{Deserialize, Serialize};

/// MACD output for the last bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub line: f64,
    /// Signal line (EMA of the MACD line)
    pub signal: f64,
    /// Histogram (line - signal)
    pub histogram: f64,
}

/// Short-term trend direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Neutral => "neutral",
        }
    }
}

/// Alignment of the 20/50/200 moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendStrength {
    StrongUp,
    ModerateUp,
    Neutral,
    ModerateDown,
    StrongDown,
}

impl TrendStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendStrength::StrongUp => "strongUp",
            TrendStrength::ModerateUp => "moderateUp",
            TrendStrength::Neutral => "neutral",
            TrendStrength::ModerateDown => "moderateDown",
            TrendStrength::StrongDown => "strongDown",
        }
    }
}

/// Every technical reading derived from one bar history.
///
/// Moving averages are `None` when the history is shorter than their
/// window; they serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    /// Close of the most recent bar
    pub last_close: f64,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    /// RSI(14), always within [0, 100]
    pub rsi: f64,
    pub macd: MacdOutput,
    pub trend: Trend,
    pub trend_strength: TrendStrength,
    pub support: f64,
    pub resistance: f64,
    /// Volume of the most recent bar
    pub current_volume: f64,
    /// Mean volume across the history
    pub average_volume: f64,
    /// current_volume / average_volume
    pub volume_ratio: f64,
    /// Number of bars the snapshot was computed from
    pub bar_count: usize,
}
