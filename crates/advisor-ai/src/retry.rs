//! Retry policy: fixed per-attempt timeout, exponential inter-attempt delay.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds for one recommendation request.
///
/// Total attempts never exceed `max_retries + 1`. Every attempt gets the
/// same `attempt_timeout`; only the delay between attempts grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Upper bound on a single completion call.
    pub attempt_timeout: Duration,
    /// Delay before the first retry; doubles for each subsequent one.
    pub backoff_base: Duration,
    /// Ceiling for the inter-attempt delay.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            attempt_timeout: Duration::from_secs(60),
            backoff_base: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Policy that makes exactly one attempt.
    pub fn no_retry(attempt_timeout: Duration) -> Self {
        Self {
            max_retries: 0,
            attempt_timeout,
            ..Self::default()
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay after failed attempt `attempt` (0-based): `base * 2^attempt`,
    /// capped at `max_backoff`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let scale = 2f64.powi(attempt.min(62) as i32);
        let seconds = self.backoff_base.as_secs_f64() * scale;
        Duration::from_secs_f64(seconds.min(self.max_backoff.as_secs_f64()))
    }
}
