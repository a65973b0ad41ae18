use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Vehicle;
use crate::utils::Patch;

pub const DEFAULT_FUEL_TYPE: &str = "PETROL";

// Request to register a vehicle
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1886, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 1, max = 20))]
    pub license_plate: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: Option<String>,
}

// Partial update: absent fields keep their value, `null` clears optional ones
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub make: Patch<String>,
    #[serde(default)]
    pub model: Patch<String>,
    #[serde(default)]
    pub year: Patch<i32>,
    #[serde(default)]
    pub license_plate: Patch<String>,
    #[serde(default)]
    pub fuel_type: Patch<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    pub fuel_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            owner_id: vehicle.owner_id,
            name: vehicle.name,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            license_plate: vehicle.license_plate,
            fuel_type: vehicle.fuel_type,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

/// Fuel types are stored upper-case
pub fn normalize_fuel_type(fuel_type: &str) -> String {
    fuel_type.trim().to_uppercase()
}
