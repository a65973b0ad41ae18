use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::vehicle_controller::find_owned_vehicle;
use crate::dto::refueling_dto::{CreateRefuelingRequest, RefuelingResponse, UpdateRefuelingRequest};
use crate::dto::ApiResponse;
use crate::models::{Period, Refueling};
use crate::repositories::{RefuelingRepository, VehicleRepository};
use crate::services::fuel_analytics;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppResult};
use crate::utils::validation::{
    validate_length, validate_non_negative, validate_positive, FieldChecks,
};

pub struct RefuelingController {
    vehicles: Arc<dyn VehicleRepository>,
    refuelings: Arc<dyn RefuelingRepository>,
}

impl RefuelingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            refuelings: state.refuelings.clone(),
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateRefuelingRequest,
    ) -> AppResult<ApiResponse<RefuelingResponse>> {
        request.validate()?;
        FieldChecks::new()
            .check("fuelAmountLiters", validate_positive(request.fuel_amount_liters))
            .check("pricePerLiter", validate_positive(request.price_per_liter))
            .finish()?;

        let vehicle = find_owned_vehicle(self.vehicles.as_ref(), request.vehicle_id, owner_id).await?;

        let now = Utc::now();
        let mut refueling = Refueling {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id,
            timestamp: request.timestamp,
            odometer_km: request.odometer_km,
            fuel_amount_liters: request.fuel_amount_liters,
            price_per_liter: request.price_per_liter,
            total_cost: 0.0,
            notes: request.notes,
            full_tank: request.full_tank,
            created_at: now,
            updated_at: now,
        };
        refueling.recompute_total_cost();

        let saved = self.refuelings.create(&refueling).await?;
        info!("Refueling {} logged for vehicle {}", saved.id, saved.vehicle_id);

        let response = self.enrich(saved, owner_id).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Refueling created successfully",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<RefuelingResponse> {
        let refueling = self.find_owned_refueling(id, owner_id).await?;
        self.enrich(refueling, owner_id).await
    }

    /// Records of one vehicle within `period`, chronological. Derived fields
    /// are computed against the vehicle's full history, not just the period.
    pub async fn list_by_vehicle(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        period: Option<Period>,
    ) -> AppResult<Vec<RefuelingResponse>> {
        find_owned_vehicle(self.vehicles.as_ref(), vehicle_id, owner_id).await?;

        let all = self
            .refuelings
            .find_by_vehicle(vehicle_id, owner_id, None)
            .await?;
        let derived = fuel_analytics::enrich_records(&all);

        let selected = fuel_analytics::select_period(all, period.as_ref());
        Ok(selected
            .into_iter()
            .map(|refueling| {
                let fields = derived.get(&refueling.id).copied().unwrap_or_default();
                RefuelingResponse::new(refueling, fields)
            })
            .collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        request: UpdateRefuelingRequest,
    ) -> AppResult<ApiResponse<RefuelingResponse>> {
        let current = self.find_owned_refueling(id, owner_id).await?;
        let updated = apply_update(current, request)?;

        let saved = self.refuelings.update(&updated).await?;
        info!("Refueling {} updated", saved.id);

        let response = self.enrich(saved, owner_id).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Refueling updated successfully",
        ))
    }

    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        self.find_owned_refueling(id, owner_id).await?;
        self.refuelings.delete(id).await?;
        info!("Refueling {} deleted", id);
        Ok(())
    }

    async fn find_owned_refueling(&self, id: Uuid, owner_id: Uuid) -> AppResult<Refueling> {
        let refueling = self
            .refuelings
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Refueling", &id.to_string()))?;

        find_owned_vehicle(self.vehicles.as_ref(), refueling.vehicle_id, owner_id).await?;
        Ok(refueling)
    }

    /// Fresh fetch of the vehicle's records, then sort and locate
    async fn enrich(&self, refueling: Refueling, owner_id: Uuid) -> AppResult<RefuelingResponse> {
        let all = self
            .refuelings
            .find_by_vehicle(refueling.vehicle_id, owner_id, None)
            .await?;
        let derived = fuel_analytics::enrich_record(refueling.id, &all);
        Ok(RefuelingResponse::new(refueling, derived))
    }
}

/// Merge a patch onto a copy of the stored record and recompute the total
fn apply_update(current: Refueling, request: UpdateRefuelingRequest) -> AppResult<Refueling> {
    let mut updated = current.clone();

    updated.timestamp = request
        .timestamp
        .apply_required(current.timestamp)
        .ok_or_else(|| validation_error("timestamp", "timestamp cannot be null"))?;
    updated.odometer_km = request
        .odometer_km
        .apply_required(current.odometer_km)
        .ok_or_else(|| validation_error("odometerKm", "odometerKm cannot be null"))?;
    updated.fuel_amount_liters = request
        .fuel_amount_liters
        .apply_required(current.fuel_amount_liters)
        .ok_or_else(|| validation_error("fuelAmountLiters", "fuelAmountLiters cannot be null"))?;
    updated.price_per_liter = request
        .price_per_liter
        .apply_required(current.price_per_liter)
        .ok_or_else(|| validation_error("pricePerLiter", "pricePerLiter cannot be null"))?;
    updated.full_tank = request
        .full_tank
        .apply_required(current.full_tank)
        .ok_or_else(|| validation_error("fullTank", "fullTank cannot be null"))?;
    updated.notes = request.notes.apply(current.notes);

    let mut checks = FieldChecks::new()
        .check("odometerKm", validate_non_negative(updated.odometer_km))
        .check("fuelAmountLiters", validate_positive(updated.fuel_amount_liters))
        .check("pricePerLiter", validate_positive(updated.price_per_liter));
    if let Some(notes) = &updated.notes {
        checks = checks.check("notes", validate_length(notes, 0, 1000));
    }
    checks.finish()?;

    updated.recompute_total_cost();
    updated.updated_at = Utc::now();
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use crate::utils::Patch;
    use chrono::NaiveDate;

    fn stored() -> Refueling {
        Refueling {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
                .and_then(|d| d.and_hms_opt(8, 0, 0))
                .unwrap(),
            odometer_km: 15000.0,
            fuel_amount_liters: 40.0,
            price_per_liter: 1.5,
            total_cost: 60.0,
            notes: Some("motorway".to_string()),
            full_tank: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_update_recomputes_total_cost() {
        let request = UpdateRefuelingRequest {
            price_per_liter: Patch::Value(2.0),
            ..Default::default()
        };
        let updated = apply_update(stored(), request).unwrap();

        assert_eq!(updated.fuel_amount_liters, 40.0);
        assert_eq!(updated.price_per_liter, 2.0);
        assert_eq!(updated.total_cost, 80.0);
        assert_eq!(updated.notes.as_deref(), Some("motorway"));
    }

    #[test]
    fn test_apply_update_clears_notes_on_null() {
        let request = UpdateRefuelingRequest {
            notes: Patch::Null,
            full_tank: Patch::Value(false),
            ..Default::default()
        };
        let updated = apply_update(stored(), request).unwrap();

        assert_eq!(updated.notes, None);
        assert!(!updated.full_tank);
        assert_eq!(updated.total_cost, 60.0);
    }

    #[test]
    fn test_apply_update_rejects_null_required_field() {
        let request = UpdateRefuelingRequest {
            fuel_amount_liters: Patch::Null,
            ..Default::default()
        };
        assert!(matches!(
            apply_update(stored(), request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_apply_update_rejects_non_positive_amount() {
        let request = UpdateRefuelingRequest {
            fuel_amount_liters: Patch::Value(0.0),
            ..Default::default()
        };
        assert!(matches!(
            apply_update(stored(), request),
            Err(AppError::Validation(_))
        ));
    }
}
