//! Fuel tracking backend
//!
//! Users register vehicles, log refuelings and read consumption and cost
//! analytics computed from their refueling history.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
