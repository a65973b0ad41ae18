//! Shared setup for the HTTP integration tests.
//!
//! The real router runs against in-memory repositories, so the tests need
//! neither PostgreSQL nor a network listener.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower::util::ServiceExt;
use uuid::Uuid;

use fuel_tracker::config::EnvironmentConfig;
use fuel_tracker::models::{Period, Refueling, User, Vehicle};
use fuel_tracker::repositories::{RefuelingRepository, UserRepository, VehicleRepository};
use fuel_tracker::utils::AppResult;
use fuel_tracker::{create_router, AppState};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// In-memory stand-in for the three PostgreSQL repositories
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    vehicles: RwLock<HashMap<Uuid, Vehicle>>,
    refuelings: RwLock<HashMap<Uuid, Refueling>>,
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> AppResult<User> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.users.read().await.values().any(|u| u.email == email))
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        self.vehicles.write().await.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.vehicles.read().await.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self
            .vehicles
            .read()
            .await
            .values()
            .filter(|v| v.owner_id == owner_id)
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles)
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        self.vehicles.write().await.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.vehicles.write().await.remove(&id);
        self.refuelings
            .write()
            .await
            .retain(|_, r| r.vehicle_id != id);
        Ok(())
    }
}

#[async_trait]
impl RefuelingRepository for InMemoryStore {
    async fn create(&self, refueling: &Refueling) -> AppResult<Refueling> {
        self.refuelings
            .write()
            .await
            .insert(refueling.id, refueling.clone());
        Ok(refueling.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Refueling>> {
        Ok(self.refuelings.read().await.get(&id).cloned())
    }

    async fn find_by_vehicle(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        period: Option<&Period>,
    ) -> AppResult<Vec<Refueling>> {
        let owned = self
            .vehicles
            .read()
            .await
            .get(&vehicle_id)
            .map_or(false, |v| v.owner_id == owner_id);
        if !owned {
            return Ok(Vec::new());
        }

        let mut records: Vec<Refueling> = self
            .refuelings
            .read()
            .await
            .values()
            .filter(|r| r.vehicle_id == vehicle_id)
            .filter(|r| period.map_or(true, |p| p.contains(r.timestamp)))
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then(b.odometer_km.total_cmp(&a.odometer_km))
        });
        Ok(records)
    }

    async fn update(&self, refueling: &Refueling) -> AppResult<Refueling> {
        self.refuelings
            .write()
            .await
            .insert(refueling.id, refueling.clone());
        Ok(refueling.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.refuelings.write().await.remove(&id);
        Ok(())
    }
}

pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgresql://localhost/fuel_tracker_test".to_string(),
        jwt_secret: "test-secret-key-for-integration-tests".to_string(),
        jwt_expiration: 3600,
        bcrypt_cost: 4,
        cors_origins: Vec::new(),
        log_level: "error".to_string(),
    }
}

/// Router plus a handle on its backing store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    pub fn spawn() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let state = AppState::new(
            test_config(),
            store.clone() as Arc<dyn UserRepository>,
            store.clone() as Arc<dyn VehicleRepository>,
            store.clone() as Arc<dyn RefuelingRepository>,
        );

        Self {
            router: create_router(state),
            store,
        }
    }

    /// Send one request; the body is parsed as JSON (`Null` when empty)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Register `email` and return a bearer token for it
    pub async fn register_and_login(&self, email: &str) -> String {
        let (status, _) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "password": TEST_PASSWORD,
                    "fullName": "Test Driver",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "registration failed for {}", email);

        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed for {}", email);

        body["token"].as_str().unwrap().to_string()
    }

    pub async fn create_vehicle(&self, token: &str, name: &str) -> Uuid {
        let (status, body) = self
            .post("/api/vehicles", token, json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::OK, "vehicle creation failed: {}", body);

        body["data"]["id"].as_str().unwrap().parse().unwrap()
    }

    pub async fn log_refueling(
        &self,
        token: &str,
        vehicle_id: Uuid,
        timestamp: &str,
        odometer_km: f64,
        fuel_amount_liters: f64,
        price_per_liter: f64,
    ) -> Value {
        let (status, body) = self
            .post(
                "/api/refuelings",
                token,
                json!({
                    "vehicleId": vehicle_id,
                    "timestamp": timestamp,
                    "odometerKm": odometer_km,
                    "fuelAmountLiters": fuel_amount_liters,
                    "pricePerLiter": price_per_liter,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "refueling creation failed: {}", body);

        body["data"].clone()
    }

    /// Three full-tank fills 500 km apart: 40 L, 45 L, 42 L
    pub async fn log_three_fills(&self, token: &str, vehicle_id: Uuid) -> Vec<Value> {
        vec![
            self.log_refueling(token, vehicle_id, "2024-01-01T08:00:00", 10_000.0, 40.0, 1.5)
                .await,
            self.log_refueling(token, vehicle_id, "2024-01-15T08:00:00", 10_500.0, 45.0, 1.6)
                .await,
            self.log_refueling(token, vehicle_id, "2024-02-01T08:00:00", 11_000.0, 42.0, 1.55)
                .await,
        ]
    }
}

pub fn assert_close(actual: &Value, expected: f64) {
    let actual = actual
        .as_f64()
        .unwrap_or_else(|| panic!("expected a number, got {}", actual));
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}
