//! Moving average indicators.

use advisor_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }

    /// Mean of the trailing window, summed directly so the result carries no
    /// drift from the sliding-window updates.
    fn latest(&self, data: &[f64]) -> Result<f64, advisor_core::IndicatorError> {
        self.validate_data(data)?;
        let window = &data[data.len() - self.period..];
        Ok(window.iter().sum::<f64>() / self.period as f64)
    }
}

/// Exponential Moving Average (EMA).
///
/// Seeded with the first value and run over the whole input, so the output
/// has one value per input point. `ema[i] = x[i] * k + ema[i-1] * (1 - k)`
/// with `k = 2 / (period + 1)`, evaluated as `ema + k * (x - ema)` so a
/// constant input reproduces itself exactly.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }

    /// Smoothing factor `k`.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Window length used for the smoothing factor.
    pub fn window(&self) -> usize {
        self.period
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let Some((&first, rest)) = data.split_first() else {
            return vec![];
        };

        let mut result = Vec::with_capacity(data.len());

        let mut ema = first;
        result.push(ema);
        for &price in rest {
            ema += self.multiplier * (price - ema);
            result.push(ema);
        }

        result
    }

    /// Defined from the first point on; the window only sets the smoothing.
    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
