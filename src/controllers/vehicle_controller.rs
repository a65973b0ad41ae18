use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    normalize_fuel_type, CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse,
    DEFAULT_FUEL_TYPE,
};
use crate::dto::ApiResponse;
use crate::models::Vehicle;
use crate::repositories::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, not_found_error, validation_error, AppResult};
use crate::utils::validation::{validate_length, FieldChecks};

/// Load a vehicle and make sure `owner_id` may access it.
/// Unknown id is a 404, someone else's vehicle a 403.
pub async fn find_owned_vehicle(
    vehicles: &dyn VehicleRepository,
    vehicle_id: Uuid,
    owner_id: Uuid,
) -> AppResult<Vehicle> {
    let vehicle = vehicles
        .find_by_id(vehicle_id)
        .await?
        .ok_or_else(|| not_found_error("Vehicle", &vehicle_id.to_string()))?;

    if !vehicle.is_owned_by(owner_id) {
        return Err(forbidden_error("access vehicle", "it belongs to another user"));
    }

    Ok(vehicle)
}

pub struct VehicleController {
    vehicles: Arc<dyn VehicleRepository>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        request.validate()?;
        validate_create(&request)?;

        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            owner_id,
            name: request.name.trim().to_string(),
            make: request.make.map(|make| make.trim().to_string()),
            model: request.model.map(|model| model.trim().to_string()),
            year: request.year,
            license_plate: request.license_plate.map(|plate| plate.trim().to_uppercase()),
            fuel_type: request
                .fuel_type
                .as_deref()
                .map(normalize_fuel_type)
                .unwrap_or_else(|| DEFAULT_FUEL_TYPE.to_string()),
            created_at: now,
            updated_at: now,
        };

        let saved = self.vehicles.create(&vehicle).await?;
        info!("Vehicle {} created for user {}", saved.id, owner_id);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(saved),
            "Vehicle created successfully",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<VehicleResponse> {
        let vehicle = find_owned_vehicle(self.vehicles.as_ref(), id, owner_id).await?;
        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.vehicles.find_by_owner(owner_id).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        let current = find_owned_vehicle(self.vehicles.as_ref(), id, owner_id).await?;
        validate_update(&request)?;

        let mut updated = current.clone();
        updated.name = request
            .name
            .apply_required(current.name)
            .map(|name| name.trim().to_string())
            .ok_or_else(|| validation_error("name", "name cannot be null"))?;
        updated.fuel_type = request
            .fuel_type
            .apply_required(current.fuel_type)
            .map(|fuel_type| normalize_fuel_type(&fuel_type))
            .ok_or_else(|| validation_error("fuelType", "fuelType cannot be null"))?;
        updated.make = request.make.apply(current.make);
        updated.model = request.model.apply(current.model);
        updated.year = request.year.apply(current.year);
        updated.license_plate = request
            .license_plate
            .apply(current.license_plate)
            .map(|plate| plate.trim().to_uppercase());
        updated.updated_at = Utc::now();

        let saved = self.vehicles.update(&updated).await?;
        info!("Vehicle {} updated", saved.id);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(saved),
            "Vehicle updated successfully",
        ))
    }

    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        find_owned_vehicle(self.vehicles.as_ref(), id, owner_id).await?;
        self.vehicles.delete(id).await?;
        info!("Vehicle {} deleted", id);
        Ok(())
    }
}

/// Length limits on the trimmed text, which is what gets stored
fn validate_create(request: &CreateVehicleRequest) -> AppResult<()> {
    let mut checks = FieldChecks::new().check("name", validate_length(&request.name, 1, 100));

    if let Some(make) = &request.make {
        checks = checks.check("make", validate_length(make, 1, 100));
    }
    if let Some(model) = &request.model {
        checks = checks.check("model", validate_length(model, 1, 100));
    }
    if let Some(plate) = &request.license_plate {
        checks = checks.check("licensePlate", validate_length(plate, 1, 20));
    }
    if let Some(fuel_type) = &request.fuel_type {
        checks = checks.check("fuelType", validate_length(fuel_type, 2, 20));
    }

    checks.finish()?;
    Ok(())
}

fn validate_update(request: &UpdateVehicleRequest) -> AppResult<()> {
    let mut checks = FieldChecks::new();

    if let Some(name) = request.name.as_value() {
        checks = checks.check("name", validate_length(name, 1, 100));
    }
    if let Some(make) = request.make.as_value() {
        checks = checks.check("make", validate_length(make, 1, 100));
    }
    if let Some(model) = request.model.as_value() {
        checks = checks.check("model", validate_length(model, 1, 100));
    }
    if let Some(plate) = request.license_plate.as_value() {
        checks = checks.check("licensePlate", validate_length(plate, 1, 20));
    }
    if let Some(fuel_type) = request.fuel_type.as_value() {
        checks = checks.check("fuelType", validate_length(fuel_type, 2, 20));
    }
    if let Some(year) = request.year.as_value() {
        if !(1886..=2100).contains(year) {
            checks = checks.check(
                "year",
                Err(validator::ValidationError::new("range")),
            );
        }
    }

    checks.finish()?;
    Ok(())
}
