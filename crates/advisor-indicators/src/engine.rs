//! Indicator engine: bar history in, indicator snapshot out.

use advisor_core::error::IndicatorError;
use advisor_core::traits::Indicator;
use advisor_core::types::{closes, volumes, Bar, IndicatorSnapshot, MacdOutput};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::levels::{support_resistance, VolumeStats};
use crate::momentum::{Macd, Rsi};
use crate::moving_average::{Ema, Sma};
use crate::trend::TrendClassifier;

/// Mean of the last `period` closes, or `InsufficientData` when the
/// history is shorter than the window.
pub fn sma(bars: &[Bar], period: usize) -> Result<f64, IndicatorError> {
    Sma::new(period).latest(&closes(bars))
}

/// Full per-bar EMA series seeded at the first close.
pub fn ema(bars: &[Bar], period: usize) -> Vec<f64> {
    Ema::new(period).calculate(&closes(bars))
}

/// RSI over the trailing `period` changes; 50 when there are fewer than
/// `period + 1` bars.
pub fn rsi(bars: &[Bar], period: usize) -> f64 {
    Rsi::new(period).latest_or_neutral(&closes(bars))
}

/// Last-bar MACD triple. Defined for any non-empty history.
pub fn macd(
    bars: &[Bar],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdOutput, IndicatorError> {
    Macd::with_periods(fast, slow, signal).latest(&closes(bars))
}

/// Window lengths used by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub sma_short: usize,
    pub sma_medium: usize,
    pub sma_long: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sma_short: 20,
            sma_medium: 50,
            sma_long: 200,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

/// Stateless indicator engine; safe to share across concurrent requests.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    sma_short: Sma,
    sma_medium: Sma,
    sma_long: Sma,
    rsi: Rsi,
    macd: Macd,
    classifier: TrendClassifier,
}

impl IndicatorEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            sma_short: Sma::new(config.sma_short),
            sma_medium: Sma::new(config.sma_medium),
            sma_long: Sma::new(config.sma_long),
            rsi: Rsi::new(config.rsi_period),
            macd: Macd::with_periods(config.macd_fast, config.macd_slow, config.macd_signal),
            classifier: TrendClassifier::new(),
        }
    }

    /// Compute every reading for the history. Fails only on an empty series.
    pub fn snapshot(&self, bars: &[Bar]) -> Result<IndicatorSnapshot, IndicatorError> {
        let prices = closes(bars);
        let Some(&last_close) = prices.last() else {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                available: 0,
            });
        };

        let sma20 = self.sma_short.latest(&prices).ok();
        let sma50 = self.sma_medium.latest(&prices).ok();
        let sma200 = self.sma_long.latest(&prices).ok();
        let rsi = self.rsi.latest_or_neutral(&prices);
        let macd = self.macd.latest(&prices)?;

        let (support, resistance) =
            support_resistance(&prices).unwrap_or((last_close, last_close));
        let volume = VolumeStats::from_volumes(&volumes(bars)).unwrap_or(VolumeStats {
            current: 0.0,
            average: 0.0,
            ratio: 0.0,
        });

        let trend = self.classifier.trend(last_close, sma20, sma50);
        let trend_strength = self.classifier.strength(sma20, sma50, sma200);

        debug!(
            bars = bars.len(),
            rsi,
            macd = macd.line,
            trend = trend.as_str(),
            "Computed indicator snapshot"
        );

        Ok(IndicatorSnapshot {
            last_close,
            sma20,
            sma50,
            sma200,
            rsi,
            macd,
            trend,
            trend_strength,
            support,
            resistance,
            current_volume: volume.current,
            average_volume: volume.average,
            volume_ratio: volume.ratio,
            bar_count: bars.len(),
        })
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::types::{Trend, TrendStrength};

    const DAY_MS: i64 = 86_400_000;

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * DAY_MS, c, c * 1.01, c * 0.99, c, 1_000.0))
            .collect()
    }

    #[test]
    fn test_sma_over_bars() {
        let bars = bars_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(sma(&bars, 3), Ok(4.0));
        assert!(matches!(
            sma(&bars, 6),
            Err(IndicatorError::InsufficientData { required: 6, available: 5 })
        ));
    }

    #[test]
    fn test_ema_over_bars_constant() {
        let bars = bars_from_closes(&[10.0; 30]);
        let series = ema(&bars, 12);
        assert_eq!(series.len(), 30);
        assert!(series.iter().all(|&v| v == 10.0));
    }

    #[test]
    fn test_rsi_over_bars() {
        let rising: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&bars_from_closes(&rising), 14), 100.0);
        assert_eq!(rsi(&bars_from_closes(&rising[..14]), 14), 50.0);
    }

    #[test]
    fn test_macd_over_bars() {
        let bars = bars_from_closes(&[55.0; 40]);
        assert_eq!(macd(&bars, 12, 26, 9), Ok(MacdOutput::default()));
        assert!(macd(&[], 12, 26, 9).is_err());
    }

    #[test]
    fn test_snapshot_uptrend() {
        let closes: Vec<f64> = (0..250).map(|i| 100.0 + i as f64 * 0.5).collect();
        let snapshot = IndicatorEngine::default().snapshot(&bars_from_closes(&closes)).unwrap();

        assert_eq!(snapshot.bar_count, 250);
        assert_eq!(snapshot.last_close, 224.5);
        assert!(snapshot.sma200.is_some());
        assert_eq!(snapshot.trend, Trend::Bullish);
        assert_eq!(snapshot.trend_strength, TrendStrength::StrongUp);
        assert_eq!(snapshot.rsi, 100.0);
        assert!(snapshot.macd.line > 0.0);
        assert!(snapshot.support < snapshot.resistance);
        assert_eq!(snapshot.volume_ratio, 1.0);
    }

    #[test]
    fn test_snapshot_short_history() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let snapshot = IndicatorEngine::default().snapshot(&bars_from_closes(&closes)).unwrap();

        assert!(snapshot.sma20.is_some());
        assert_eq!(snapshot.sma50, None);
        assert_eq!(snapshot.sma200, None);
        assert_eq!(snapshot.trend, Trend::Neutral);
        assert_eq!(snapshot.trend_strength, TrendStrength::Neutral);
        assert_eq!(snapshot.rsi, 0.0);
    }

    #[test]
    fn test_snapshot_serializes_missing_averages_as_null() {
        let snapshot = IndicatorEngine::default()
            .snapshot(&bars_from_closes(&[10.0, 11.0]))
            .unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert!(json["sma20"].is_null());
        assert_eq!(json["trendStrength"], "neutral");
        assert_eq!(json["volumeRatio"], 1.0);
    }

    #[test]
    fn test_snapshot_empty_history() {
        assert!(IndicatorEngine::default().snapshot(&[]).is_err());
    }
}
