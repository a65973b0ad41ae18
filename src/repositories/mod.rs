//! Persistence
//!
//! One trait per aggregate plus its PostgreSQL implementation. Controllers
//! only see the traits.

pub mod refueling_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use refueling_repository::{PgRefuelingRepository, RefuelingRepository};
pub use user_repository::{PgUserRepository, UserRepository};
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};
