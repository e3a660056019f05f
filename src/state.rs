//! Shared application state built once at start-up.

use crate::{
    config::AppConfig,
    services::{AppMetrics, SimpleRateLimiter, TokenService},
};

/// Everything the handlers need, cloned into each worker
///
/// Clones share the limiter windows and the metrics registry.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub token_service: TokenService,
    pub limiter: SimpleRateLimiter,
    pub metrics: AppMetrics,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, prometheus::Error> {
        Ok(Self {
            token_service: TokenService::new(config.token.clone()),
            limiter: SimpleRateLimiter::new(config.rate_limit.clone()),
            metrics: AppMetrics::new()?,
            config,
        })
    }
}
