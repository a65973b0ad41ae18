use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::analytics_controller::AnalyticsController;
use crate::controllers::refueling_controller::RefuelingController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::refueling_dto::RefuelingResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::dto::{ApiResponse, PeriodQuery};
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::models::{ConsumptionGraph, CostGraph, FuelStatistics};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/refuelings", get(list_refuelings))
        .route("/:id/statistics", get(get_statistics))
        .route("/:id/consumption-graph", get(get_consumption_graph))
        .route("/:id/cost-graph", get(get_cost_graph))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(user.user_id, request).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list_by_owner(user.user_id).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_by_id(id, user.user_id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(id, user.user_id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(id, user.user_id).await?;
    Ok(Json(ApiResponse::message("Vehicle deleted successfully")))
}

async fn list_refuelings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<RefuelingResponse>>, AppError> {
    let controller = RefuelingController::new(&state);
    let response = controller
        .list_by_vehicle(id, user.user_id, query.period())
        .await?;
    Ok(Json(response))
}

async fn get_statistics(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<FuelStatistics>, AppError> {
    let controller = AnalyticsController::new(&state);
    let response = controller.statistics(id, user.user_id, query.period()).await?;
    Ok(Json(response))
}

async fn get_consumption_graph(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ConsumptionGraph>, AppError> {
    let controller = AnalyticsController::new(&state);
    let response = controller
        .consumption_graph(id, user.user_id, query.period())
        .await?;
    Ok(Json(response))
}

async fn get_cost_graph(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<CostGraph>, AppError> {
    let controller = AnalyticsController::new(&state);
    let response = controller.cost_graph(id, user.user_id, query.period()).await?;
    Ok(Json(response))
}
