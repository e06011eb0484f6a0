use std::collections::BTreeMap;

use crate::{
    entities::{Driver, Rider, Route, Trip, TripId},
    error::{invalid_input_error, Error},
};

const FARE_PER_SEAT_UNIT: f64 = 1.5;

pub trait Record {
    fn key(&self) -> u64;
}

impl Record for Rider {
    fn key(&self) -> u64 {
        self.id
    }
}

impl Record for Driver {
    fn key(&self) -> u64 {
        self.id
    }
}

/// Inserts `record`, replacing any record with the same key in place so
/// directory order stays the order of first insertion.
pub fn upsert<T: Record>(records: &mut Vec<T>, record: T) {
    match records.iter_mut().find(|r| r.key() == record.key()) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

pub fn calculate_fare(route: &Route, seats: u32) -> f64 {
    route.distance() as f64 * f64::from(seats) * FARE_PER_SEAT_UNIT
}

#[tracing::instrument(skip(trips))]
pub fn fetch_trip_mut<'a>(
    trips: &'a mut BTreeMap<TripId, Trip>,
    id: &TripId,
) -> Result<&'a mut Trip, Error> {
    trips.get_mut(id).ok_or_else(invalid_input_error)
}

#[tracing::instrument(skip(drivers))]
pub fn fetch_driver_mut<'a>(drivers: &'a mut [Driver], id: u64) -> Result<&'a mut Driver, Error> {
    drivers
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or_else(invalid_input_error)
}

#[test]
fn calculate_fare_test() {
    assert_eq!(calculate_fare(&Route::new("A", "ABCDE"), 2), 12.0);
    assert_eq!(calculate_fare(&Route::new("ABCDE", "A"), 2), 12.0);
    assert_eq!(calculate_fare(&Route::new("X", "Y"), 3), 0.0);
    assert_eq!(calculate_fare(&Route::new("Home", "Airport"), 1), 4.5);
}

#[test]
fn upsert_keeps_position_test() {
    let mut drivers = vec![];
    upsert(&mut drivers, Driver::new(7, "a"));
    upsert(&mut drivers, Driver::new(3, "b"));
    upsert(&mut drivers, Driver::new(7, "c"));

    let ids: Vec<u64> = drivers.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![7, 3]);
    assert_eq!(drivers[0].name, "c");
}
