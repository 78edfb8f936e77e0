//! Live quote data.

use serde::{Deserialize, Serialize};

use super::Symbol;

/// Current quote snapshot for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Symbol
    pub symbol: Symbol,
    /// Last traded price
    pub price: f64,
    /// Absolute change versus the previous close
    pub change: f64,
    /// Change versus the previous close, in percent
    pub percent_change: f64,
    /// Session volume
    pub volume: f64,
    /// Market capitalization, when the provider reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_low: Option<f64>,
}

impl Quote {
    /// Previous session close implied by price and change.
    pub fn previous_close(&self) -> f64 {
        self.price - self.change
    }
}
