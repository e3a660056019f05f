//! Business logic and service layer modules.
//!
//! The token service is the core; metrics and rate limiting support the
//! HTTP surface around it.

pub mod metrics;
pub mod rate_limit;
pub mod token;

pub use metrics::*;
pub use rate_limit::*;
pub use token::*;
