use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::refueling_controller::RefuelingController;
use crate::dto::refueling_dto::{CreateRefuelingRequest, RefuelingResponse, UpdateRefuelingRequest};
use crate::dto::ApiResponse;
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_refueling_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_refueling))
        .route(
            "/:id",
            get(get_refueling).put(update_refueling).delete(delete_refueling),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_refueling(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRefuelingRequest>,
) -> Result<Json<ApiResponse<RefuelingResponse>>, AppError> {
    let controller = RefuelingController::new(&state);
    let response = controller.create(user.user_id, request).await?;
    Ok(Json(response))
}

async fn get_refueling(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<RefuelingResponse>, AppError> {
    let controller = RefuelingController::new(&state);
    let response = controller.get_by_id(id, user.user_id).await?;
    Ok(Json(response))
}

async fn update_refueling(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRefuelingRequest>,
) -> Result<Json<ApiResponse<RefuelingResponse>>, AppError> {
    let controller = RefuelingController::new(&state);
    let response = controller.update(id, user.user_id, request).await?;
    Ok(Json(response))
}

async fn delete_refueling(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = RefuelingController::new(&state);
    controller.delete(id, user.user_id).await?;
    Ok(Json(ApiResponse::message("Refueling deleted successfully")))
}
