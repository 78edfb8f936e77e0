//! Market data collaborators.
//!
//! The advisor treats market data as an opaque fetch; these sources cover
//! offline runs (CSV files) and tests (in-memory fixtures).

mod csv_source;
mod memory;

pub use csv_source::{load_bars, CsvMarketData};
pub use memory::StaticMarketData;

use advisor_core::types::{Bar, Quote, Symbol};

/// Bars in a trading year, used for the 52-week range.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Derive a quote from the tail of a daily history.
///
/// Price and volume come from the last bar, change from the previous close,
/// and the 52-week range from the trailing year of bars.
pub fn quote_from_bars(symbol: &Symbol, bars: &[Bar]) -> Option<Quote> {
    let last = bars.last()?;
    let prev_close = bars
        .len()
        .checked_sub(2)
        .map(|i| bars[i].close)
        .unwrap_or(last.close);

    let change = last.close - prev_close;
    let percent_change = if prev_close > 0.0 {
        change / prev_close * 100.0
    } else {
        0.0
    };

    let year = &bars[bars.len().saturating_sub(TRADING_DAYS_PER_YEAR)..];
    let high = year.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let low = year.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

    Some(Quote {
        symbol: symbol.clone(),
        price: last.close,
        change,
        percent_change,
        volume: last.volume,
        market_cap: None,
        fifty_two_week_high: Some(high),
        fifty_two_week_low: Some(low),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_from_bars() {
        let symbol = Symbol::parse("AAPL").unwrap();
        let bars = vec![
            Bar::new(1, 99.0, 101.0, 98.0, 100.0, 1_000.0),
            Bar::new(2, 100.0, 112.0, 99.5, 110.0, 3_000.0),
        ];
        let quote = quote_from_bars(&symbol, &bars).unwrap();

        assert_eq!(quote.price, 110.0);
        assert_eq!(quote.change, 10.0);
        assert!((quote.percent_change - 10.0).abs() < 1e-10);
        assert_eq!(quote.volume, 3_000.0);
        assert_eq!(quote.fifty_two_week_high, Some(112.0));
        assert_eq!(quote.fifty_two_week_low, Some(98.0));
    }

    #[test]
    fn test_quote_from_single_bar() {
        let symbol = Symbol::parse("MSFT").unwrap();
        let quote = quote_from_bars(&symbol, &[Bar::new(1, 10.0, 10.0, 10.0, 10.0, 5.0)]).unwrap();
        assert_eq!(quote.change, 0.0);
        assert_eq!(quote.percent_change, 0.0);
        assert!(quote_from_bars(&symbol, &[]).is_none());
    }
}
