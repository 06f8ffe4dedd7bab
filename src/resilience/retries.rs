//! Retry policy for connection attempts.
//!
//! # Responsibilities
//! - Decide whether another attempt follows a failure
//! - Supply the delay before that attempt
//!
//! # Design Decisions
//! - Fixed delay, no backoff and no jitter
//! - Unbounded unless a maximum is configured

use std::time::Duration;

use crate::config::RetryConfig;

/// Fixed-interval retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    delay: Duration,
    max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Retry forever, waiting `delay` after each failure.
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    /// Stop after `max_attempts` attempts in total.
    pub fn bounded(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts: Some(max_attempts),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Delay to wait after the `attempt`-th failure (1-based), or `None`
    /// when the policy is exhausted.
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        match self.max_attempts {
            Some(max) if attempt >= max => None,
            _ => Some(self.delay),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(Duration::from_millis(5_000))
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        let delay = Duration::from_millis(config.delay_ms);
        match config.max_attempts {
            Some(max) => Self::bounded(delay, max),
            None => Self::unbounded(delay),
        }
    }
}
