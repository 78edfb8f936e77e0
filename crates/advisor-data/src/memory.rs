//! In-memory market data.

use advisor_core::error::DataError;
use advisor_core::traits::MarketData;
use advisor_core::types::{Bar, Quote, Symbol};
use async_trait::async_trait;
use std::collections::HashMap;

use crate::quote_from_bars;

/// Fixed quotes and histories keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    entries: HashMap<Symbol, (Quote, Vec<Bar>)>,
}

impl StaticMarketData {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a quote and history for a symbol.
    pub fn insert(&mut self, quote: Quote, bars: Vec<Bar>) {
        self.entries.insert(quote.symbol.clone(), (quote, bars));
    }

    /// Validate a history, then store it with a quote derived from the last bars.
    pub fn insert_bars(&mut self, symbol: Symbol, bars: Vec<Bar>) -> Result<(), DataError> {
        Bar::validate_series(&bars)?;
        let quote = quote_from_bars(&symbol, &bars)
            .ok_or_else(|| DataError::NoDataAvailable(symbol.to_string()))?;
        self.insert(quote, bars);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, quote: Quote, bars: Vec<Bar>) -> Self {
        self.insert(quote, bars);
        self
    }

    fn entry(&self, symbol: &Symbol) -> Result<&(Quote, Vec<Bar>), DataError> {
        self.entries
            .get(symbol)
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }
}

#[async_trait]
impl MarketData for StaticMarketData {
    async fn quote(&self, symbol: &Symbol) -> Result<Quote, DataError> {
        Ok(self.entry(symbol)?.0.clone())
    }

    async fn daily_bars(&self, symbol: &Symbol) -> Result<Vec<Bar>, DataError> {
        Ok(self.entry(symbol)?.1.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_lookup() {
        let symbol = Symbol::parse("TSLA").unwrap();
        let bars = vec![
            Bar::new(1, 200.0, 205.0, 195.0, 200.0, 10.0),
            Bar::new(2, 200.0, 215.0, 199.0, 210.0, 12.0),
        ];

        let mut source = StaticMarketData::new();
        source.insert_bars(symbol.clone(), bars.clone()).unwrap();

        assert_eq!(source.daily_bars(&symbol).await.unwrap(), bars);
        assert_eq!(source.quote(&symbol).await.unwrap().price, 210.0);

        let other = Symbol::parse("GM").unwrap();
        assert!(matches!(
            source.quote(&other).await,
            Err(DataError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn test_insert_empty_history_fails() {
        let mut source = StaticMarketData::new();
        assert!(source.insert_bars(Symbol::parse("F").unwrap(), vec![]).is_err());
    }

    #[test]
    fn test_insert_bars_rejects_invalid_history() {
        let symbol = Symbol::parse("F").unwrap();
        let mut source = StaticMarketData::new();

        let negative = vec![
            Bar::new(1, 12.0, 12.5, 11.5, 12.0, 10.0),
            Bar::new(2, 12.0, 12.5, 11.5, -1.0, 10.0),
        ];
        assert!(matches!(
            source.insert_bars(symbol.clone(), negative),
            Err(DataError::InvalidBar { index: 1, .. })
        ));

        let nan = vec![Bar::new(1, 12.0, 12.5, 11.5, f64::NAN, 10.0)];
        assert!(matches!(
            source.insert_bars(symbol.clone(), nan),
            Err(DataError::InvalidBar { index: 0, .. })
        ));

        let unordered = vec![
            Bar::new(2, 12.0, 12.5, 11.5, 12.0, 10.0),
            Bar::new(1, 12.0, 12.5, 11.5, 12.0, 10.0),
        ];
        assert!(source.insert_bars(symbol.clone(), unordered).is_err());
        assert!(source.entries.is_empty());
    }
}
