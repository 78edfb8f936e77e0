//! Technical indicators, trend classification and signal generation.
//!
//! This crate provides:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Support/resistance levels and volume statistics
//! - Trend classification and discrete signal generation
//! - [`IndicatorEngine`], which turns a bar history into an indicator snapshot
//!
//! Everything here is pure and synchronous.

pub mod engine;
pub mod levels;
pub mod momentum;
pub mod moving_average;
pub mod signals;
pub mod trend;

pub use engine::{ema, macd, rsi, sma, EngineConfig, IndicatorEngine};
pub use levels::{support_resistance, VolumeStats};
pub use momentum::{Macd, Rsi, NEUTRAL_RSI};
pub use moving_average::{Ema, Sma};
pub use signals::{SignalGenerator, SignalThresholds};
pub use trend::TrendClassifier;
