pub mod analytics_controller;
pub mod auth_controller;
pub mod refueling_controller;
pub mod vehicle_controller;
