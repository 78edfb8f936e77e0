//! CSV data source.

use advisor_core::error::DataError;
use advisor_core::traits::MarketData;
use advisor_core::types::{Bar, Quote, Symbol};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::quote_from_bars;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", default)]
    close: Option<f64>,
    #[serde(rename = "Adj Close", alias = "adj_close", default)]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// Daily bars from `<dir>/<SYMBOL>.csv`.
///
/// The quote is derived from the last two bars of the same file.
#[derive(Debug, Clone)]
pub struct CsvMarketData {
    dir: PathBuf,
}

impl CsvMarketData {
    /// Create a new CSV data source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DataError::NoDataAvailable(format!(
                "data directory '{}' does not exist",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    /// Locate the file for a symbol: `AAPL.csv`, `aapl.csv`, `AAPL_daily.csv`, `aapl_daily.csv`.
    fn find_file(&self, symbol: &Symbol) -> Result<PathBuf, DataError> {
        let upper = symbol.as_str();
        let lower = upper.to_lowercase();
        let candidates = [
            self.dir.join(format!("{upper}.csv")),
            self.dir.join(format!("{lower}.csv")),
            self.dir.join(format!("{upper}_daily.csv")),
            self.dir.join(format!("{lower}_daily.csv")),
        ];

        candidates
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }
}

#[async_trait]
impl MarketData for CsvMarketData {
    async fn quote(&self, symbol: &Symbol) -> Result<Quote, DataError> {
        let bars = self.daily_bars(symbol).await?;
        quote_from_bars(symbol, &bars).ok_or_else(|| DataError::NoDataAvailable(symbol.to_string()))
    }

    async fn daily_bars(&self, symbol: &Symbol) -> Result<Vec<Bar>, DataError> {
        let path = self.find_file(symbol)?;
        let bars = load_bars(&path)?;
        if bars.is_empty() {
            return Err(DataError::NoDataAvailable(symbol.to_string()));
        }
        info!(symbol = %symbol, bars = bars.len(), path = %path.display(), "Loaded CSV history");
        Ok(bars)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Load, sort and validate bars from a CSV file.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::ParseError(e.to_string()))?;

    let mut bars = Vec::new();

    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

        let timestamp = parse_timestamp(&record.date)?;
        // Adjusted close only stands in when the file has no raw close.
        let close = record.close.or(record.adj_close).ok_or_else(|| {
            DataError::ParseError(format!("no close price for {}", record.date))
        })?;

        bars.push(Bar::new(
            timestamp,
            record.open,
            record.high,
            record.low,
            close,
            record.volume,
        ));
    }

    // Sort by timestamp
    bars.sort_by_key(|b| b.timestamp);
    if !bars.is_empty() {
        Bar::validate_series(&bars)?;
    }
    debug!(path = %path.display(), bars = bars.len(), "Parsed CSV bars");

    Ok(bars)
}

/// Parse various timestamp formats.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    // Try various formats
    let formats = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
