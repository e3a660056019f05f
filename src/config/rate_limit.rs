//! Token issuance rate limiting configuration.

use std::{env, time::Duration};

/// Per-client issuance budget: `max_requests` tokens every `period_seconds`
#[derive(Clone)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub period_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            period_seconds: 60,
        }
    }
}

impl RateLimitConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_requests = env::var("RATE_LIMIT_RPM")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_requests);

        let period_seconds = env::var("RATE_LIMIT_PERIOD")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|period: &u64| *period > 0)
            .unwrap_or(defaults.period_seconds);

        Self {
            max_requests,
            period_seconds,
        }
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_seconds)
    }
}
