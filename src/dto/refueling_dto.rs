use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{DerivedFields, Refueling};
use crate::utils::Patch;

fn default_full_tank() -> bool {
    true
}

// Request to log a refueling
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRefuelingRequest {
    pub vehicle_id: Uuid,

    pub timestamp: NaiveDateTime,

    #[validate(range(min = 0.0))]
    pub odometer_km: f64,

    pub fuel_amount_liters: f64,

    pub price_per_liter: f64,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,

    #[serde(default = "default_full_tank")]
    pub full_tank: bool,
}

// Partial update; totalCost is never accepted from clients
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRefuelingRequest {
    #[serde(default)]
    pub timestamp: Patch<NaiveDateTime>,
    #[serde(default)]
    pub odometer_km: Patch<f64>,
    #[serde(default)]
    pub fuel_amount_liters: Patch<f64>,
    #[serde(default)]
    pub price_per_liter: Patch<f64>,
    #[serde(default)]
    pub notes: Patch<String>,
    #[serde(default)]
    pub full_tank: Patch<bool>,
}

// Stored fields plus the values derived on read
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefuelingResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub timestamp: NaiveDateTime,
    pub odometer_km: f64,
    pub fuel_amount_liters: f64,
    pub price_per_liter: f64,
    pub total_cost: f64,
    pub notes: Option<String>,
    pub full_tank: bool,
    pub fuel_consumption: Option<f64>,
    pub distance_since_last_refueling: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefuelingResponse {
    pub fn new(refueling: Refueling, derived: DerivedFields) -> Self {
        Self {
            id: refueling.id,
            vehicle_id: refueling.vehicle_id,
            timestamp: refueling.timestamp,
            odometer_km: refueling.odometer_km,
            fuel_amount_liters: refueling.fuel_amount_liters,
            price_per_liter: refueling.price_per_liter,
            total_cost: refueling.total_cost,
            notes: refueling.notes,
            full_tank: refueling.full_tank,
            fuel_consumption: derived.fuel_consumption,
            distance_since_last_refueling: derived.distance_since_last_refueling,
            created_at: refueling.created_at,
            updated_at: refueling.updated_at,
        }
    }
}
