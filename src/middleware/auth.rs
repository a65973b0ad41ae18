//! JWT authentication middleware
//!
//! Verifies the bearer token, checks that the user still exists and injects
//! an [`AuthenticatedUser`] into the request extensions. Handlers read it
//! with `Extension<AuthenticatedUser>` and pass the id on explicitly.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Identity of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;
    let user_id = claims.user_id()?;

    // Tokens outlive deleted accounts otherwise.
    if state.users.find_by_id(user_id).await?.is_none() {
        return Err(AppError::Unauthorized("User not found".to_string()));
    }

    debug!("Authenticated user {}", user_id);
    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}
