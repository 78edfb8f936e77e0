//! Market data trait definitions.

use crate::error::DataError;
use crate::types::{Bar, Quote, Symbol};
use async_trait::async_trait;

/// Trait for market data collaborators.
///
/// Implementations only fetch; indicator math and retry policy live elsewhere.
/// Failures are reported as [`DataError`] and are never retried by the
/// recommendation orchestrator.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Get the current quote for a symbol.
    async fn quote(&self, symbol: &Symbol) -> Result<Quote, DataError>;

    /// Fetch the daily bar history.
    ///
    /// # Returns
    /// Bars ordered from oldest to newest; at least 200 when the provider has them
    async fn daily_bars(&self, symbol: &Symbol) -> Result<Vec<Bar>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
