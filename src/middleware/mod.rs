//! HTTP middleware
//!
//! JWT authentication and CORS.

pub mod auth;
pub mod cors;

pub use auth::{auth_middleware, AuthenticatedUser};
pub use cors::cors_layer;
