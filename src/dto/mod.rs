pub mod auth_dto;
pub mod common_dto;
pub mod refueling_dto;
pub mod vehicle_dto;

pub use common_dto::{ApiResponse, PeriodQuery};
