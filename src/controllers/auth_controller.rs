use std::sync::Arc;

use bcrypt::{hash, verify};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::dto::ApiResponse;
use crate::models::User;
use crate::repositories::UserRepository;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::validation::{validate_length, FieldChecks};

pub struct AuthController {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            jwt: state.jwt.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<ApiResponse<UserResponse>> {
        request.validate()?;
        FieldChecks::new()
            .check("fullName", validate_length(&request.full_name, 2, 100))
            .finish()?;

        let email = normalize_email(&request.email);
        if self.users.email_exists(&email).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        // bcrypt is CPU bound, keep it off the async workers
        let cost = self.bcrypt_cost;
        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = User::new(email, password_hash, request.full_name.trim().to_string());
        let saved = self.users.create(&user).await?;
        info!("Registered user {}", saved.id);

        Ok(ApiResponse::success_with_message(
            UserResponse::from(saved),
            "User registered successfully",
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&normalize_email(&request.email))
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let password = request.password;
        let password_hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify(password, &password_hash))
            .await
            .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if !valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = generate_token(user.id, &self.jwt)?;
        info!("User {} logged in", user.id);

        Ok(LoginResponse::bearer(
            token,
            self.jwt.expiration,
            UserResponse::from(user),
        ))
    }

    pub async fn me(&self, user_id: Uuid) -> AppResult<UserResponse> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
