//! Recommendation types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{IndicatorSnapshot, Quote, Signal, Symbol};

/// Recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }

    /// Parse the exact upper-case wire form.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "BUY" => Some(Action::Buy),
            "SELL" => Some(Action::Sell),
            "HOLD" => Some(Action::Hold),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated trading recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommendation: Action,
    /// Confidence within [0, 1]
    pub confidence: f64,
    pub target_price: f64,
    pub stop_loss: f64,
    pub reasoning: String,
    /// At least one entry
    pub risks: Vec<String>,
    #[serde(default)]
    pub catalysts: Vec<String>,
}

/// Everything the orchestrator needs to build a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub symbol: Symbol,
    pub quote: Quote,
    pub indicators: IndicatorSnapshot,
    #[serde(default)]
    pub signals: Vec<Signal>,
}
