//! Middleware for cross-cutting concerns: CORS headers, request IDs with
//! request logging, and request metrics.

pub mod cors;
pub mod metrics;
pub mod request_id;

pub use cors::*;
pub use metrics::*;
pub use request_id::*;
