//! Analytics models
//!
//! Results produced by the fuel analytics engine. `None` marks a value that
//! is undefined for the given data (serialized as `null`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Summary statistics over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelStatistics {
    pub total_refuelings: usize,
    pub total_fuel_amount: f64,
    pub total_cost: f64,
    pub total_distance: f64,
    /// Liters per 100 km
    pub average_consumption: Option<f64>,
    pub average_price_per_liter: f64,
    pub period_start: Option<NaiveDateTime>,
    pub period_end: Option<NaiveDateTime>,
}

impl FuelStatistics {
    pub fn empty() -> Self {
        Self {
            total_refuelings: 0,
            total_fuel_amount: 0.0,
            total_cost: 0.0,
            total_distance: 0.0,
            average_consumption: None,
            average_price_per_liter: 0.0,
            period_start: None,
            period_end: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionDataPoint {
    pub date: NaiveDateTime,
    pub fuel_consumption: f64,
    pub odometer: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionGraph {
    pub data_points: Vec<ConsumptionDataPoint>,
    pub average_consumption: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostDataPoint {
    pub date: NaiveDateTime,
    pub total_cost: f64,
    pub price_per_liter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostGraph {
    pub data_points: Vec<CostDataPoint>,
    pub total_cost: f64,
    pub average_price_per_liter: f64,
}

/// Values derived for a single record relative to its predecessor in
/// odometer order. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFields {
    pub fuel_consumption: Option<f64>,
    pub distance_since_last_refueling: Option<f64>,
}
