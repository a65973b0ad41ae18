//! Refueling model
//!
//! Maps the `refuelings` table. `total_cost` is denormalized and always
//! recomputed from `fuel_amount_liters * price_per_liter` before a save.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Refueling {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub timestamp: NaiveDateTime,
    pub odometer_km: f64,
    pub fuel_amount_liters: f64,
    pub price_per_liter: f64,
    pub total_cost: f64,
    pub notes: Option<String>,
    pub full_tank: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Refueling {
    pub fn recompute_total_cost(&mut self) {
        self.total_cost = self.fuel_amount_liters * self.price_per_liter;
    }
}

/// Inclusive date-time window used to scope listings and analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Period {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_period_bounds_are_inclusive() {
        let period = Period::new(at(1), at(10));
        assert!(period.contains(at(1)));
        assert!(period.contains(at(10)));
        assert!(!period.contains(at(11)));
    }

    #[test]
    fn test_recompute_total_cost() {
        let mut refueling = Refueling {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            timestamp: at(1),
            odometer_km: 1000.0,
            fuel_amount_liters: 40.0,
            price_per_liter: 1.5,
            total_cost: 0.0,
            notes: None,
            full_tank: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        refueling.recompute_total_cost();
        assert_eq!(refueling.total_cost, 60.0);
    }
}
