//! Services
//!
//! Business logic that does not touch HTTP or the database.

pub mod fuel_analytics;
