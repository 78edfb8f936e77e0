//! Error types for the stock advisor.

use std::time::Duration;
use thiserror::Error;

/// Top-level advisor error.
///
/// Every failure a request can end in maps onto one of these variants.
/// [`ErrorKind::is_retryable`] decides which of them the orchestrator may retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InputValidation(String),

    #[error("Market data unavailable: {0}")]
    DataUnavailable(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Completion service rejected credentials: {0}")]
    Unauthorized(String),

    #[error("Completion service rate limited the request{}", retry_after_display(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Completion call timed out after {}ms", .after.as_millis())]
    Timeout { after: Duration },

    #[error("Transient completion failure: {0}")]
    Transient(String),

    #[error("Could not parse completion response: {0}")]
    ParseFailure(String),

    #[error("Invalid recommendation: {}", schema_display(.missing_fields, .invalid_fields))]
    SchemaValidation {
        missing_fields: Vec<String>,
        invalid_fields: Vec<String>,
    },

    #[error("Completion service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Request cancelled")]
    Cancelled,
}

fn retry_after_display(secs: &Option<u64>) -> String {
    match secs {
        Some(secs) => format!(" (retry after {secs}s)"),
        None => String::new(),
    }
}

fn schema_display(missing: &[String], invalid: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing fields - {}", missing.join(", ")));
    }
    if !invalid.is_empty() {
        parts.push(format!("invalid fields - {}", invalid.join(", ")));
    }
    parts.join("; ")
}

/// Classification of an [`AdvisorError`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    InputValidation,
    DataUnavailable,
    Indicator,
    Unauthorized,
    RateLimited,
    Timeout,
    Transient,
    ParseFailure,
    SchemaValidation,
    Rejected,
    Cancelled,
}

impl ErrorKind {
    /// Only timeouts, transient service failures and unparseable bodies are retried.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Timeout | Self::Transient | Self::ParseFailure)
    }

    /// HTTP status the presentation boundary reports for this kind.
    pub fn http_status(self) -> u16 {
        match self {
            Self::InputValidation => 400,
            Self::Unauthorized => 401,
            Self::RateLimited => 429,
            Self::DataUnavailable => 502,
            Self::Timeout => 504,
            _ => 500,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::InputValidation => "input_validation",
            Self::DataUnavailable => "data_unavailable",
            Self::Indicator => "indicator",
            Self::Unauthorized => "unauthorized",
            Self::RateLimited => "rate_limited",
            Self::Timeout => "timeout",
            Self::Transient => "transient",
            Self::ParseFailure => "parse_failure",
            Self::SchemaValidation => "schema_validation",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AdvisorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::InputValidation(_) => ErrorKind::InputValidation,
            Self::DataUnavailable(_) => ErrorKind::DataUnavailable,
            Self::Indicator(_) => ErrorKind::Indicator,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Transient(_) => ErrorKind::Transient,
            Self::ParseFailure(_) => ErrorKind::ParseFailure,
            Self::SchemaValidation { .. } => ErrorKind::SchemaValidation,
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

/// Market data errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for {0}")]
    NoDataAvailable(String),

    #[error("Invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for advisor operations.
pub type AdvisorResult<T> = Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(AdvisorError::Timeout { after: Duration::from_secs(1) }.is_retryable());
        assert!(AdvisorError::Transient("502".into()).is_retryable());
        assert!(AdvisorError::ParseFailure("no json".into()).is_retryable());

        assert!(!AdvisorError::Unauthorized("bad key".into()).is_retryable());
        assert!(!AdvisorError::RateLimited { retry_after_secs: None }.is_retryable());
        assert!(!AdvisorError::Configuration("missing key".into()).is_retryable());
        assert!(!AdvisorError::InputValidation("bad symbol".into()).is_retryable());
        assert!(!AdvisorError::Cancelled.is_retryable());
        assert!(!AdvisorError::SchemaValidation {
            missing_fields: vec!["confidence".into()],
            invalid_fields: vec![],
        }
        .is_retryable());
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorKind::InputValidation.http_status(), 400);
        assert_eq!(ErrorKind::Unauthorized.http_status(), 401);
        assert_eq!(ErrorKind::RateLimited.http_status(), 429);
        assert_eq!(ErrorKind::DataUnavailable.http_status(), 502);
        assert_eq!(ErrorKind::SchemaValidation.http_status(), 500);
    }

    #[test]
    fn test_schema_message_lists_fields() {
        let err = AdvisorError::SchemaValidation {
            missing_fields: vec!["confidence".into(), "risks".into()],
            invalid_fields: vec!["recommendation".into()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid recommendation: missing fields - confidence, risks; invalid fields - recommendation"
        );
    }

    #[test]
    fn test_data_error_converts_to_unavailable() {
        let err: AdvisorError = DataError::NoDataAvailable("AAPL".into()).into();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
    }
}
