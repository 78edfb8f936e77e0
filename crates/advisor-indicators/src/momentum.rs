//! Momentum indicators.

use advisor_core::traits::Indicator;
use advisor_core::types::MacdOutput;

use crate::moving_average::Ema;

/// RSI reported when the history is too short to measure momentum.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions. Each value averages the
/// gains and losses of the trailing `period` changes:
/// `rsi = 100 - 100 / (1 + avg_gain / avg_loss)`, and 100 when there were
/// no losses in the window.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn from_changes(changes: &[f64], period: usize) -> f64 {
        let (gains, losses) = changes.iter().fold((0.0, 0.0), |(g, l), &change| {
            if change >= 0.0 {
                (g + change, l)
            } else {
                (g, l - change)
            }
        });

        let avg_gain = gains / period as f64;
        let avg_loss = losses / period as f64;

        if avg_loss == 0.0 {
            return 100.0;
        }
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }

    /// RSI of the most recent window, or [`NEUTRAL_RSI`] when there are fewer
    /// than `period + 1` points.
    pub fn latest_or_neutral(&self, data: &[f64]) -> f64 {
        self.latest(data).unwrap_or(NEUTRAL_RSI)
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        // Calculate price changes
        let changes: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();

        changes
            .windows(self.period)
            .map(|window| Self::from_changes(window, self.period))
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum. Both EMAs run
/// over the full history, the MACD line is their per-point difference, and
/// the signal line is an EMA of that line, so every input point gets an
/// output.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }

    /// MACD line series (fast EMA - slow EMA per point).
    pub fn line(&self, data: &[f64]) -> Vec<f64> {
        let fast = self.fast.calculate(data);
        let slow = self.slow.calculate(data);
        fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect()
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        let line = self.line(data);
        let signal = self.signal.calculate(&line);

        line.iter()
            .zip(signal.iter())
            .map(|(&line, &signal)| MacdOutput {
                line,
                signal,
                histogram: line - signal,
            })
            .collect()
    }

    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}
