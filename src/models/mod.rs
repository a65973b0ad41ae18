//! Data models
//!
//! Entities mapping the PostgreSQL schema and the analytics result types.

pub mod analytics;
pub mod refueling;
pub mod user;
pub mod vehicle;

pub use analytics::*;
pub use refueling::{Period, Refueling};
pub use user::User;
pub use vehicle::Vehicle;
