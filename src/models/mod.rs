//! Request, response, and audit data structures.

pub mod api;
pub mod audit;
pub mod token;

pub use api::*;
pub use audit::*;
pub use token::*;
