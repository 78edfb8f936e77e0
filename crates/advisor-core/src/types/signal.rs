//! Trading signal types.

use serde::{Deserialize, Serialize};

/// Signal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
    Sell,
    Alert,
}

impl SignalType {
    /// Same label as the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Buy => "BUY",
            SignalType::Sell => "SELL",
            SignalType::Alert => "ALERT",
        }
    }
}

/// Signal strength label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalStrength {
    Strong,
    Moderate,
    High,
}

/// A discrete signal derived from the indicator snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub reason: String,
    pub strength: SignalStrength,
}

impl Signal {
    pub fn new(signal_type: SignalType, reason: impl Into<String>, strength: SignalStrength) -> Self {
        Self {
            signal_type,
            reason: reason.into(),
            strength,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_json_shape() {
        let signal = Signal::new(SignalType::Buy, "Oversold (RSI<30)", SignalStrength::Strong);
        let json = serde_json::to_value(&signal).unwrap();

        assert_eq!(json["type"], "BUY");
        assert_eq!(json["strength"], "Strong");
        assert_eq!(json["reason"], "Oversold (RSI<30)");
    }

    #[test]
    fn test_signal_type_label_matches_json() {
        for kind in [SignalType::Buy, SignalType::Sell, SignalType::Alert] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }
}
