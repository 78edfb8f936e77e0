//! Core traits for the stock advisor.

mod completion;
mod indicator;
mod market_data;

pub use completion::{CompletionRequest, CompletionService, ResponseFormat};
pub use indicator::Indicator;
pub use market_data::MarketData;
