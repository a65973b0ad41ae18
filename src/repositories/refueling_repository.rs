use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Period, Refueling};
use crate::utils::errors::{database_error, AppResult};

#[async_trait]
pub trait RefuelingRepository: Send + Sync {
    async fn create(&self, refueling: &Refueling) -> AppResult<Refueling>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Refueling>>;
    /// Records of `vehicle_id`, only if the vehicle belongs to `owner_id`.
    /// Order is unspecified; callers sort as their computation requires.
    async fn find_by_vehicle(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        period: Option<&Period>,
    ) -> AppResult<Vec<Refueling>>;
    async fn update(&self, refueling: &Refueling) -> AppResult<Refueling>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct PgRefuelingRepository {
    pool: PgPool,
}

impl PgRefuelingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefuelingRepository for PgRefuelingRepository {
    async fn create(&self, refueling: &Refueling) -> AppResult<Refueling> {
        sqlx::query_as::<_, Refueling>(
            r#"
            INSERT INTO refuelings (
                id, vehicle_id, "timestamp", odometer_km, fuel_amount_liters,
                price_per_liter, total_cost, notes, full_tank, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(refueling.id)
        .bind(refueling.vehicle_id)
        .bind(refueling.timestamp)
        .bind(refueling.odometer_km)
        .bind(refueling.fuel_amount_liters)
        .bind(refueling.price_per_liter)
        .bind(refueling.total_cost)
        .bind(&refueling.notes)
        .bind(refueling.full_tank)
        .bind(refueling.created_at)
        .bind(refueling.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("Error creating refueling", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Refueling>> {
        sqlx::query_as::<_, Refueling>("SELECT * FROM refuelings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Error finding refueling", e))
    }

    async fn find_by_vehicle(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        period: Option<&Period>,
    ) -> AppResult<Vec<Refueling>> {
        sqlx::query_as::<_, Refueling>(
            r#"
            SELECT r.*
            FROM refuelings r
            JOIN vehicles v ON v.id = r.vehicle_id
            WHERE r.vehicle_id = $1
              AND v.owner_id = $2
              AND ($3::timestamp IS NULL OR r."timestamp" >= $3)
              AND ($4::timestamp IS NULL OR r."timestamp" <= $4)
            ORDER BY r."timestamp" ASC, r.odometer_km DESC
            "#,
        )
        .bind(vehicle_id)
        .bind(owner_id)
        .bind(period.map(|p| p.start))
        .bind(period.map(|p| p.end))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Error listing refuelings", e))
    }

    async fn update(&self, refueling: &Refueling) -> AppResult<Refueling> {
        sqlx::query_as::<_, Refueling>(
            r#"
            UPDATE refuelings
            SET "timestamp" = $2, odometer_km = $3, fuel_amount_liters = $4, price_per_liter = $5,
                total_cost = $6, notes = $7, full_tank = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(refueling.id)
        .bind(refueling.timestamp)
        .bind(refueling.odometer_km)
        .bind(refueling.fuel_amount_liters)
        .bind(refueling.price_per_liter)
        .bind(refueling.total_cost)
        .bind(&refueling.notes)
        .bind(refueling.full_tank)
        .bind(refueling.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("Error updating refueling", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM refuelings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Error deleting refueling", e))?;

        Ok(())
    }
}
