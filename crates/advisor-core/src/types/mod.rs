//! Core data types for the stock advisor.

mod ohlcv;
mod quote;
mod recommendation;
mod signal;
mod snapshot;
mod symbol;

pub use ohlcv::{closes, volumes, Bar};
pub use quote::Quote;
pub use recommendation::{Action, Recommendation, RecommendationRequest};
pub use signal::{Signal, SignalStrength, SignalType};
pub use snapshot::{IndicatorSnapshot, MacdOutput, Trend, TrendStrength};
pub use symbol::Symbol;
