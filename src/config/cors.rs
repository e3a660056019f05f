//! Cross-origin resource sharing configuration.

use std::env;

/// Values written into the `Access-Control-Allow-*` response headers
#[derive(Clone)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET, POST, OPTIONS".to_string(),
            allow_headers: "Content-Type".to_string(),
        }
    }
}

impl CorsConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            allow_origin: env::var("CORS_ALLOW_ORIGIN").unwrap_or(defaults.allow_origin),
            ..defaults
        }
    }
}
