//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One daily OHLCV bar.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Calendar date of the bar (UTC).
    pub fn date(&self) -> NaiveDate {
        self.datetime().date_naive()
    }

    /// Check the price/volume invariants: all prices > 0, volume >= 0.
    pub fn validate(&self) -> Result<(), String> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (name, value) in prices {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a positive price, got {value}"));
            }
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(format!("volume must be non-negative, got {}", self.volume));
        }
        Ok(())
    }

    /// Validate an entire history: non-empty, ascending dates, every bar valid.
    pub fn validate_series(bars: &[Bar]) -> Result<(), DataError> {
        if bars.is_empty() {
            return Err(DataError::NoDataAvailable("empty bar history".into()));
        }
        for (index, bar) in bars.iter().enumerate() {
            bar.validate()
                .map_err(|reason| DataError::InvalidBar { index, reason })?;
            if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
                return Err(DataError::InvalidBar {
                    index,
                    reason: "bars must be ordered by ascending date".into(),
                });
            }
        }
        Ok(())
    }
}

/// Extract close prices as a vector.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Extract volumes as a vector.
pub fn volumes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume).collect()
}
