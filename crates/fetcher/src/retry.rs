use std::time::Duration;

use pagewatch_common::MonitorConfig;

/// Bounded exponential backoff for page fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per fetch. Zero means the fetch is never tried.
    pub attempts: u32,
    /// Base delay in seconds.
    pub backoff_factor: u64,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            attempts: config.retries,
            backoff_factor: config.backoff_factor,
            max_delay: config.max_backoff,
        }
    }

    /// Delay after failed attempt `attempt` (0-based): `factor * 2^attempt`
    /// seconds, capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let multiplier = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let secs = self.backoff_factor.saturating_mul(multiplier);
        Duration::from_secs(secs).min(self.max_delay)
    }

    /// Whether `attempt` (0-based) is the final one.
    pub fn is_last(&self, attempt: u32) -> bool {
        attempt.saturating_add(1) >= self.attempts
    }
}
