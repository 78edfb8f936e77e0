//! Core types and traits for the stock advisor.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, Quote, Symbol)
//! - Indicator snapshots, trading signals and recommendations
//! - The error taxonomy shared by every crate
//! - Core traits for indicators, market data and completion services

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AdvisorError, AdvisorResult, DataError, ErrorKind, IndicatorError};
pub use traits::*;
pub use types::*;
