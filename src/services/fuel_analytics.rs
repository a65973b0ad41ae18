//! Fuel analytics engine
//!
//! Pure functions that turn a vehicle's refueling records into consumption
//! and cost analytics. Nothing here performs I/O or keeps state between
//! calls; callers pass in the records they fetched from the repository.
//!
//! Two orderings are involved:
//! - distance math always follows odometer order (ascending `odometer_km`);
//! - the time series are built from records in chronological order, as
//!   produced by [`select_period`].

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{
    ConsumptionDataPoint, ConsumptionGraph, CostDataPoint, CostGraph, DerivedFields,
    FuelStatistics, Period, Refueling,
};

const PER_100_KM: f64 = 100.0;

/// Restrict `records` to `period` and order them chronologically.
///
/// Without a period every record is kept. Records are first ordered by
/// odometer descending and then stably by timestamp, so records sharing a
/// timestamp keep the higher odometer first.
pub fn select_period(records: Vec<Refueling>, period: Option<&Period>) -> Vec<Refueling> {
    let mut selected: Vec<Refueling> = match period {
        Some(period) => records
            .into_iter()
            .filter(|r| period.contains(r.timestamp))
            .collect(),
        None => {
            let mut all = records;
            all.sort_by(|a, b| b.odometer_km.total_cmp(&a.odometer_km));
            all
        }
    };

    selected.sort_by_key(|r| r.timestamp);
    selected
}

/// Summary statistics over the selected records. Input order is irrelevant.
pub fn compute_statistics(records: &[Refueling]) -> FuelStatistics {
    let by_odometer = sorted_by_odometer(records);
    let (first, last) = match (by_odometer.first(), by_odometer.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return FuelStatistics::empty(),
    };

    let total_fuel_amount: f64 = records.iter().map(|r| r.fuel_amount_liters).sum();
    let total_cost: f64 = records.iter().map(|r| r.total_cost).sum();
    let average_price_per_liter = if total_fuel_amount > 0.0 {
        total_cost / total_fuel_amount
    } else {
        0.0
    };

    let total_distance = last.odometer_km - first.odometer_km;

    // The lowest-odometer fill only tops up the tank before the tracked
    // distance starts, so its fuel is left out of the numerator.
    let average_consumption = if by_odometer.len() >= 2 && total_distance > 0.0 {
        let fuel_after_first: f64 = by_odometer
            .iter()
            .skip(1)
            .map(|r| r.fuel_amount_liters)
            .sum();
        Some(fuel_after_first / total_distance * PER_100_KM)
    } else {
        None
    };

    FuelStatistics {
        total_refuelings: records.len(),
        total_fuel_amount,
        total_cost,
        total_distance,
        average_consumption,
        average_price_per_liter,
        period_start: Some(first.timestamp),
        period_end: Some(last.timestamp),
    }
}

/// Consumption per consecutive pair of records.
///
/// `records` must already be in chronological order; the pairs are taken in
/// that order and each pair's distance comes from its own odometer values.
/// A point is emitted only for a positive distance ending on a full tank.
pub fn compute_consumption_series(records: &[Refueling]) -> ConsumptionGraph {
    let data_points: Vec<ConsumptionDataPoint> = records
        .windows(2)
        .filter_map(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            let distance = current.odometer_km - previous.odometer_km;

            interval_consumption(current, distance).map(|fuel_consumption| ConsumptionDataPoint {
                date: current.timestamp,
                fuel_consumption,
                odometer: current.odometer_km,
            })
        })
        .collect();

    let average_consumption = if data_points.is_empty() {
        None
    } else {
        let sum: f64 = data_points.iter().map(|p| p.fuel_consumption).sum();
        Some(sum / data_points.len() as f64)
    };

    ConsumptionGraph {
        data_points,
        average_consumption,
    }
}

/// One cost point per record, in the order given.
pub fn compute_cost_series(records: &[Refueling]) -> CostGraph {
    let data_points: Vec<CostDataPoint> = records
        .iter()
        .map(|r| CostDataPoint {
            date: r.timestamp,
            total_cost: r.total_cost,
            price_per_liter: r.price_per_liter,
        })
        .collect();

    let total_cost: f64 = records.iter().map(|r| r.total_cost).sum();
    let total_fuel_amount: f64 = records.iter().map(|r| r.fuel_amount_liters).sum();

    // Unlike the statistics, an empty series reports 0 here rather than null.
    let average_price_per_liter = if total_fuel_amount > 0.0 {
        total_cost / total_fuel_amount
    } else {
        0.0
    };

    CostGraph {
        data_points,
        total_cost,
        average_price_per_liter,
    }
}

/// Derived fields of the record `target_id` within the vehicle's full
/// record set. The lowest-odometer record (or an id not in the set) gets no
/// derived values.
pub fn enrich_record(target_id: Uuid, records: &[Refueling]) -> DerivedFields {
    let by_odometer = sorted_by_odometer(records);

    match by_odometer.iter().position(|r| r.id == target_id) {
        Some(index) if index > 0 => derive_fields(by_odometer[index - 1], by_odometer[index]),
        _ => DerivedFields::default(),
    }
}

/// [`enrich_record`] for every record of the set, sorting only once.
pub fn enrich_records(records: &[Refueling]) -> HashMap<Uuid, DerivedFields> {
    let by_odometer = sorted_by_odometer(records);
    let mut derived = HashMap::with_capacity(by_odometer.len());

    if let Some(first) = by_odometer.first() {
        derived.insert(first.id, DerivedFields::default());
    }
    for pair in by_odometer.windows(2) {
        derived
            .entry(pair[1].id)
            .or_insert_with(|| derive_fields(pair[0], pair[1]));
    }

    derived
}

fn derive_fields(previous: &Refueling, current: &Refueling) -> DerivedFields {
    // Raw difference, not clamped.
    let distance = current.odometer_km - previous.odometer_km;

    DerivedFields {
        fuel_consumption: interval_consumption(current, distance),
        distance_since_last_refueling: Some(distance),
    }
}

/// L/100km for the interval ending at `current`, if it can be measured
fn interval_consumption(current: &Refueling, distance: f64) -> Option<f64> {
    if distance > 0.0 && current.full_tank {
        Some((current.fuel_amount_liters / distance) * PER_100_KM)
    } else {
        None
    }
}

/// Stable ascending sort on odometer; equal readings keep their input order.
fn sorted_by_odometer(records: &[Refueling]) -> Vec<&Refueling> {
    let mut sorted: Vec<&Refueling> = records.iter().collect();
    sorted.sort_by(|a, b| a.odometer_km.total_cmp(&b.odometer_km));
    sorted
}
