//! Utilities
//!
//! Error handling, JWT, validation helpers and partial-update fields.

pub mod errors;
pub mod jwt;
pub mod patch;
pub mod validation;

pub use errors::{AppError, AppResult};
pub use patch::Patch;
