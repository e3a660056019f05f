//! Utility functions and helper modules.
//!
//! Request inspection helpers, the HMAC signing primitives, and clock access.

pub mod hmac;
pub mod http;
pub mod route;
pub mod time;

pub use http::*;
pub use route::*;
pub use time::*;
