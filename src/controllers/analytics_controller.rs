use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::controllers::vehicle_controller::find_owned_vehicle;
use crate::models::{ConsumptionGraph, CostGraph, FuelStatistics, Period, Refueling};
use crate::repositories::{RefuelingRepository, VehicleRepository};
use crate::services::fuel_analytics;
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// Authorizes the caller, fetches one snapshot of records and hands it to
/// the analytics engine.
pub struct AnalyticsController {
    vehicles: Arc<dyn VehicleRepository>,
    refuelings: Arc<dyn RefuelingRepository>,
}

impl AnalyticsController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            refuelings: state.refuelings.clone(),
        }
    }

    pub async fn statistics(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        period: Option<Period>,
    ) -> AppResult<FuelStatistics> {
        let records = self.selected_records(vehicle_id, owner_id, period).await?;
        Ok(fuel_analytics::compute_statistics(&records))
    }

    pub async fn consumption_graph(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        period: Option<Period>,
    ) -> AppResult<ConsumptionGraph> {
        let records = self.selected_records(vehicle_id, owner_id, period).await?;
        Ok(fuel_analytics::compute_consumption_series(&records))
    }

    pub async fn cost_graph(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        period: Option<Period>,
    ) -> AppResult<CostGraph> {
        let records = self.selected_records(vehicle_id, owner_id, period).await?;
        Ok(fuel_analytics::compute_cost_series(&records))
    }

    /// Records of the period in chronological order
    async fn selected_records(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        period: Option<Period>,
    ) -> AppResult<Vec<Refueling>> {
        find_owned_vehicle(self.vehicles.as_ref(), vehicle_id, owner_id).await?;

        let records = self
            .refuelings
            .find_by_vehicle(vehicle_id, owner_id, period.as_ref())
            .await?;
        debug!(
            "Analytics over {} records of vehicle {} (period: {:?})",
            records.len(),
            vehicle_id,
            period
        );

        Ok(fuel_analytics::select_period(records, period.as_ref()))
    }
}
