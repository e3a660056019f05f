//! HTTP request handlers and the application factory.

pub mod error;
pub mod health;
pub mod metrics;
pub mod openapi;
pub mod token;
pub mod version;

pub use error::*;
pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use token::*;
pub use version::*;
