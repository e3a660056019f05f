//! Stream Token API - signed access tokens for external audio streaming servers
//!
//! A listener asks this service for a token, then presents `token`, `user` and
//! `expiry` to a streaming server. The token is the lowercase-hex
//! HMAC-SHA256 of `user=<user>&exp=<expiry>` under a shared secret, valid for
//! 60 seconds. Verification is stateless recomputation.
//!
//! ## Architecture
//!
//! - `config/` - environment-driven configuration
//! - `services/` - the token service, metrics, and rate limiting
//! - `handlers/` - HTTP adapters and the app factory
//! - `middleware/` - CORS, request IDs, and request metrics
//! - `models/` - request/response and audit types
//! - `utils/` - HMAC primitives, clock, and request helpers
//!
//! ## Quick Start
//!
//! ```no_run
//! use stream_token_api::{AppConfig, AppState, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let state = AppState::new(AppConfig::from_env()).expect("metrics registry");
//!     actix_web::HttpServer::new(move || create_app(state.clone()))
//!         .bind("127.0.0.1:8080")?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use config::{
    AppConfig, CorsConfig, MetricsConfig, RateLimitConfig, Secret, ServerConfig, TokenConfig,
    DEFAULT_USER, MAX_USER_LENGTH, TOKEN_VALIDITY_SECONDS,
};
pub use handlers::{
    ApiError, create_app, create_openapi_spec, generate_token, get_metrics, health,
    verify_token, version,
};
pub use middleware::{Cors, MetricsMiddleware, RequestIdMiddleware};
pub use models::{
    ErrorResponse, HealthResponse, TokenAuditEvent, TokenEventOutcome, TokenEventType,
    TokenQuery, TokenResponse, VerifyQuery, VerifyResponse, VersionResponse,
};
pub use services::{AppMetrics, IssuedToken, SimpleRateLimiter, TokenError, TokenService};
pub use state::AppState;
