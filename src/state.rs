//! Shared application state
//!
//! Cloned into every axum handler. Repositories are held behind trait
//! objects so the same router runs against PostgreSQL or a test double.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    PgRefuelingRepository, PgUserRepository, PgVehicleRepository, RefuelingRepository,
    UserRepository, VehicleRepository,
};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub users: Arc<dyn UserRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub refuelings: Arc<dyn RefuelingRepository>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        users: Arc<dyn UserRepository>,
        vehicles: Arc<dyn VehicleRepository>,
        refuelings: Arc<dyn RefuelingRepository>,
    ) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            config,
            users,
            vehicles,
            refuelings,
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool
    pub fn with_pool(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self::new(
            config,
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgVehicleRepository::new(pool.clone())),
            Arc::new(PgRefuelingRepository::new(pool)),
        )
    }
}
