//! Fixed-window rate limiting for token issuance.

use crate::config::RateLimitConfig;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Instant,
};

/// In-memory limiter keyed by client address
///
/// Each key gets `max_requests` hits per window; the window restarts on the
/// first hit after it lapses.
#[derive(Clone)]
pub struct SimpleRateLimiter {
    config: RateLimitConfig,
    windows: Arc<Mutex<HashMap<String, (usize, Instant)>>>,
}

impl SimpleRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count a hit for `key`; `false` means the budget is spent
    pub fn check_rate_limit(&self, key: &str) -> bool {
        let period = self.config.period();
        let now = Instant::now();
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        windows.retain(|_, (_, started)| now.duration_since(*started) < period);

        let (count, _) = windows.entry(key.to_string()).or_insert((0, now));
        if *count >= self.config.max_requests {
            return false;
        }
        *count += 1;
        true
    }
}
