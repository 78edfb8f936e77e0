//! Ticker symbols.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AdvisorError;

/// A validated ticker: one to five ASCII upper-case letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub const MAX_LEN: usize = 5;

    /// Validate a raw symbol. Input is taken as-is; callers that accept
    /// lower-case user input normalize before parsing.
    pub fn parse(raw: &str) -> Result<Self, AdvisorError> {
        let valid = !raw.is_empty()
            && raw.len() <= Self::MAX_LEN
            && raw.bytes().all(|b| b.is_ascii_uppercase());
        if !valid {
            return Err(AdvisorError::InputValidation(format!(
                "Invalid stock symbol '{raw}': expected 1-5 upper-case letters"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = AdvisorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_valid_symbols() {
        for raw in ["A", "AAPL", "GOOGL"] {
            assert_eq!(Symbol::parse(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn test_invalid_symbols() {
        for raw in ["", "aapl", "TOOLONG", "BRK.B", "AB1", " AAPL", "ÄPPL"] {
            let err = Symbol::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InputValidation, "{raw}");
            assert_eq!(err.kind().http_status(), 400);
        }
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let ok: Symbol = serde_json::from_str("\"MSFT\"").unwrap();
        assert_eq!(ok.to_string(), "MSFT");
        assert!(serde_json::from_str::<Symbol>("\"msft\"").is_err());
    }
}
