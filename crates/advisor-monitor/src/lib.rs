//! Logging and observability setup.

mod logging;

pub use logging::{setup_logging, LogFormat};
