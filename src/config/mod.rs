//! Configuration structures and loading utilities.
//!
//! Every config struct has a `Default` and a `from_env()` constructor. The
//! environment is read once at start-up; the resulting values are injected
//! into the app through [`AppConfig`].

pub mod cors;
pub mod metrics;
pub mod rate_limit;
pub mod server;
pub mod token;

pub use cors::*;
pub use metrics::*;
pub use rate_limit::*;
pub use server::*;
pub use token::*;

/// Bundle of every configuration value the application factory needs
#[derive(Clone, Default)]
pub struct AppConfig {
    pub token: TokenConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub metrics: MetricsConfig,
}

impl AppConfig {
    /// Load every section from environment variables
    pub fn from_env() -> Self {
        Self {
            token: TokenConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            cors: CorsConfig::from_env(),
            metrics: MetricsConfig::from_env(),
        }
    }

    /// Replace the token section, keeping the rest
    pub fn with_token(mut self, token: TokenConfig) -> Self {
        self.token = token;
        self
    }

    /// Replace the rate limit section, keeping the rest
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }
}
