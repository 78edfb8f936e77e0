//! Discrete signal generation.

use advisor_core::types::{IndicatorSnapshot, Signal, SignalStrength, SignalType};
use serde::{Deserialize, Serialize};

/// Thresholds for the signal rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    /// Sell above this RSI
    pub overbought: f64,
    /// Buy below this RSI
    pub oversold: f64,
    /// Alert when current / average volume exceeds this
    pub volume_alert_ratio: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
            volume_alert_ratio: 1.5,
        }
    }
}

/// Builds the ordered signal list: RSI first, then MACD, then volume.
///
/// An empty list is a legitimate outcome.
#[derive(Debug, Clone, Default)]
pub struct SignalGenerator {
    thresholds: SignalThresholds,
}

impl SignalGenerator {
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SignalThresholds {
        &self.thresholds
    }

    pub fn generate(&self, snapshot: &IndicatorSnapshot) -> Vec<Signal> {
        let t = &self.thresholds;
        let mut signals = Vec::with_capacity(3);

        if snapshot.rsi > t.overbought {
            signals.push(Signal::new(
                SignalType::Sell,
                format!("Overbought (RSI>{})", t.overbought),
                SignalStrength::Strong,
            ));
        } else if snapshot.rsi < t.oversold {
            signals.push(Signal::new(
                SignalType::Buy,
                format!("Oversold (RSI<{})", t.oversold),
                SignalStrength::Strong,
            ));
        }

        let macd = &snapshot.macd;
        if macd.histogram > 0.0 && macd.histogram > macd.signal {
            signals.push(Signal::new(
                SignalType::Buy,
                "MACD bullish crossover",
                SignalStrength::Moderate,
            ));
        } else if macd.histogram < 0.0 && macd.histogram < macd.signal {
            signals.push(Signal::new(
                SignalType::Sell,
                "MACD bearish crossover",
                SignalStrength::Moderate,
            ));
        }

        if snapshot.volume_ratio > t.volume_alert_ratio {
            signals.push(Signal::new(
                SignalType::Alert,
                "High volume activity",
                SignalStrength::High,
            ));
        }

        signals
    }
}
