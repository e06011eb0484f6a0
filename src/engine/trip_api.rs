use super::helpers::{calculate_fare, fetch_driver_mut, fetch_trip_mut};
use super::{Engine, State};

use async_trait::async_trait;

use crate::{
    api::TripAPI,
    entities::{Route, Trip, TripId},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl TripAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_trip(
        &self,
        rider_id: u64,
        route: Route,
        seats: u32,
    ) -> Result<Option<Trip>, Error> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        if !state.riders.iter().any(|r| r.id == rider_id) {
            tracing::warn!("no such rider, returning early...");
            return Ok(None);
        }

        // first available driver in directory order, no ranking
        let index = match state.drivers.iter().position(|d| d.is_available()) {
            Some(index) => index,
            None => {
                tracing::warn!("no available drivers, returning early...");
                return Ok(None);
            }
        };

        let id = state.next_trip_id();
        let fare = calculate_fare(&route, seats);

        let driver = &mut state.drivers[index];
        driver.assign(id)?;

        let trip = Trip::new(id, rider_id, driver.id, route, seats, fare);
        state.trips.insert(id, trip.clone());

        tracing::info!(trip_id = %id, driver_id = trip.driver_id, fare, "trip created");

        Ok(Some(trip))
    }

    #[tracing::instrument(skip(self))]
    async fn find_trip(&self, id: TripId) -> Result<Trip, Error> {
        let state = self.state.lock().await;

        state.trips.get(&id).cloned().ok_or_else(invalid_input_error)
    }

    #[tracing::instrument(skip(self))]
    async fn update_trip(&self, id: TripId, route: Route, seats: u32) -> Result<Trip, Error> {
        let mut state = self.state.lock().await;

        let trip = fetch_trip_mut(&mut state.trips, &id)?;
        trip.update_route(route, seats)?;

        Ok(trip.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn withdraw_trip(&self, id: TripId) -> Result<Trip, Error> {
        let mut state = self.state.lock().await;

        finish_trip(&mut state, id, Trip::withdraw)
    }

    #[tracing::instrument(skip(self))]
    async fn end_trip(&self, id: TripId) -> Result<Trip, Error> {
        let mut state = self.state.lock().await;

        finish_trip(&mut state, id, Trip::end)
    }

    #[tracing::instrument(skip(self))]
    async fn trip_history(&self, rider_id: u64) -> Result<Vec<Trip>, Error> {
        let state = self.state.lock().await;

        Ok(state
            .trips
            .values()
            .filter(|t| t.rider_id == rider_id)
            .cloned()
            .collect())
    }
}

fn finish_trip(
    state: &mut State,
    id: TripId,
    transition: fn(&mut Trip) -> Result<u64, Error>,
) -> Result<Trip, Error> {
    let trip = fetch_trip_mut(&mut state.trips, &id)?;
    let driver_id = transition(trip)?;
    let trip = trip.clone();

    match fetch_driver_mut(&mut state.drivers, driver_id) {
        Ok(driver) if driver.current_trip == Some(id) => driver.free(),
        Ok(_) => tracing::warn!(driver_id, "driver is not on this trip, leaving it as is"),
        Err(_) => tracing::warn!(driver_id, "driver no longer exists"),
    }

    tracing::info!(trip_id = %id, status = %trip.status.name(), "trip finished");

    Ok(trip)
}

#[cfg(test)]
fn engine_with(riders: &[u64], drivers: &[u64]) -> Engine {
    use crate::api::{DriverAPI, RiderAPI};
    use crate::entities::{Driver, Rider};
    use tokio_test::block_on;

    let engine = Engine::new();

    for id in riders {
        block_on(engine.create_rider(Rider::new(*id))).unwrap();
    }

    for id in drivers {
        block_on(engine.create_driver(Driver::new(*id, format!("Driver {}", id)))).unwrap();
    }

    engine
}

#[test]
fn empty_history_test() {
    use tokio_test::block_on;

    let engine = engine_with(&[1, 2], &[3]);
    assert!(block_on(engine.trip_history(1)).unwrap().is_empty());

    block_on(engine.create_trip(2, Route::new("X", "Y"), 1))
        .unwrap()
        .unwrap();

    assert!(block_on(engine.trip_history(1)).unwrap().is_empty());
    assert_eq!(block_on(engine.trip_history(2)).unwrap().len(), 1);
}

#[test]
fn trip_ids_increase_test() {
    use tokio_test::block_on;

    let engine = engine_with(&[1], &[2]);
    let mut last = 0;

    for _ in 0..5 {
        let trip = block_on(engine.create_trip(1, Route::new("X", "Y"), 1))
            .unwrap()
            .unwrap();
        assert!(trip.id.0 > last);
        last = trip.id.0;

        block_on(engine.end_trip(trip.id)).unwrap();
    }

    assert_eq!(last, 5);
}

#[test]
fn failed_creation_does_not_consume_id_test() {
    use tokio_test::block_on;

    let engine = engine_with(&[1], &[2]);

    assert_eq!(
        block_on(engine.create_trip(99, Route::new("X", "Y"), 1)).unwrap(),
        None
    );

    let trip = block_on(engine.create_trip(1, Route::new("X", "Y"), 1))
        .unwrap()
        .unwrap();
    assert_eq!(trip.id, TripId(1));
}

#[test]
fn driver_claimed_and_released_test() {
    use crate::api::DriverAPI;
    use tokio_test::block_on;

    let engine = engine_with(&[1], &[2]);

    let trip = block_on(engine.create_trip(1, Route::new("X", "Y"), 1))
        .unwrap()
        .unwrap();
    let driver = block_on(engine.find_driver(2)).unwrap().unwrap();
    assert!(!driver.is_available());
    assert_eq!(driver.current_trip, Some(trip.id));

    block_on(engine.withdraw_trip(trip.id)).unwrap();
    assert!(block_on(engine.find_driver(2)).unwrap().unwrap().is_available());

    let trip = block_on(engine.create_trip(1, Route::new("X", "Y"), 1))
        .unwrap()
        .unwrap();
    assert!(!block_on(engine.find_driver(2)).unwrap().unwrap().is_available());

    block_on(engine.end_trip(trip.id)).unwrap();
    assert!(block_on(engine.find_driver(2)).unwrap().unwrap().is_available());
}

#[test]
fn no_available_driver_test() {
    use crate::api::DriverAPI;
    use tokio_test::block_on;

    let engine = engine_with(&[1], &[]);
    assert_eq!(
        block_on(engine.create_trip(1, Route::new("X", "Y"), 1)).unwrap(),
        None
    );
    assert!(block_on(engine.trip_history(1)).unwrap().is_empty());

    let engine = engine_with(&[1], &[2]);
    block_on(engine.update_driver_availability(2, false)).unwrap();
    assert_eq!(
        block_on(engine.create_trip(1, Route::new("X", "Y"), 1)).unwrap(),
        None
    );
    assert!(block_on(engine.trip_history(1)).unwrap().is_empty());
    assert!(block_on(engine.find_trip(TripId(1)))
        .unwrap_err()
        .is_invalid_input_error());
}

#[test]
fn busy_driver_not_assigned_test() {
    use tokio_test::block_on;

    let engine = engine_with(&[1, 2], &[3]);
    block_on(engine.create_trip(1, Route::new("X", "Y"), 1))
        .unwrap()
        .unwrap();

    assert_eq!(
        block_on(engine.create_trip(2, Route::new("X", "Y"), 1)).unwrap(),
        None
    );
}

#[test]
fn first_available_driver_assigned_test() {
    use crate::api::DriverAPI;
    use tokio_test::block_on;

    let engine = engine_with(&[1], &[7, 4, 9]);
    block_on(engine.update_driver_availability(7, false)).unwrap();

    let first = block_on(engine.create_trip(1, Route::new("X", "Y"), 1))
        .unwrap()
        .unwrap();
    assert_eq!(first.driver_id, 4);

    let second = block_on(engine.create_trip(1, Route::new("X", "Y"), 1))
        .unwrap()
        .unwrap();
    assert_eq!(second.driver_id, 9);
}

#[test]
fn fare_test() {
    use tokio_test::block_on;

    let engine = engine_with(&[1], &[2]);
    let trip = block_on(engine.create_trip(1, Route::new("A", "ABCDE"), 2))
        .unwrap()
        .unwrap();

    assert_eq!(trip.fare, 12.0);
    assert_eq!(block_on(engine.find_trip(trip.id)).unwrap().fare, 12.0);
}

#[test]
fn end_trip_scenario_test() {
    use crate::api::DriverAPI;
    use tokio_test::block_on;

    let engine = engine_with(&[1], &[2]);
    let trip = block_on(engine.create_trip(1, Route::new("X", "Y"), 1))
        .unwrap()
        .unwrap();
    assert_eq!(trip.status.name(), "IN_PROGRESS");

    let trip = block_on(engine.end_trip(trip.id)).unwrap();
    assert_eq!(trip.status.name(), "COMPLETED");
    assert_eq!(
        block_on(engine.find_trip(trip.id)).unwrap().status.name(),
        "COMPLETED"
    );
    assert!(block_on(engine.find_driver(2)).unwrap().unwrap().is_available());
}

#[test]
fn withdraw_twice_test() {
    use tokio_test::block_on;

    let engine = engine_with(&[1], &[2]);
    let trip = block_on(engine.create_trip(1, Route::new("X", "Y"), 1))
        .unwrap()
        .unwrap();

    let withdrawn = block_on(engine.withdraw_trip(trip.id)).unwrap();
    assert_eq!(withdrawn.status.name(), "WITHDRAWN");

    let err = block_on(engine.withdraw_trip(trip.id)).unwrap_err();
    assert!(err.is_invalid_invocation_error());
    assert_eq!(block_on(engine.find_trip(trip.id)).unwrap(), withdrawn);
}

#[test]
fn withdraw_completed_trip_test() {
    use crate::api::DriverAPI;
    use tokio_test::block_on;

    let engine = engine_with(&[1, 5], &[2]);
    let trip = block_on(engine.create_trip(1, Route::new("X", "Y"), 1))
        .unwrap()
        .unwrap();
    block_on(engine.end_trip(trip.id)).unwrap();

    // driver picks up someone else before the stale withdraw arrives
    let other = block_on(engine.create_trip(5, Route::new("X", "Y"), 1))
        .unwrap()
        .unwrap();

    assert!(block_on(engine.withdraw_trip(trip.id))
        .unwrap_err()
        .is_invalid_invocation_error());
    assert_eq!(
        block_on(engine.find_trip(trip.id)).unwrap().status.name(),
        "COMPLETED"
    );
    assert_eq!(
        block_on(engine.find_driver(2)).unwrap().unwrap().current_trip,
        Some(other.id)
    );
}

#[test]
fn unknown_trip_test() {
    use tokio_test::block_on;

    let engine = engine_with(&[1], &[2]);

    assert!(block_on(engine.withdraw_trip(TripId(7)))
        .unwrap_err()
        .is_invalid_input_error());
    assert!(block_on(engine.end_trip(TripId(7)))
        .unwrap_err()
        .is_invalid_input_error());
    assert!(block_on(engine.update_trip(TripId(7), Route::new("A", "B"), 1))
        .unwrap_err()
        .is_invalid_input_error());
}

#[test]
fn update_trip_test() {
    use tokio_test::block_on;

    let engine = engine_with(&[1], &[2]);
    let trip = block_on(engine.create_trip(1, Route::new("A", "ABCDE"), 2))
        .unwrap()
        .unwrap();

    let updated = block_on(engine.update_trip(trip.id, Route::new("Home", "Work"), 3)).unwrap();
    assert_eq!(updated.route, Route::new("Home", "Work"));
    assert_eq!(updated.seats, 3);
    assert_eq!(updated.fare, 12.0);
    assert_eq!(block_on(engine.find_trip(trip.id)).unwrap(), updated);

    block_on(engine.end_trip(trip.id)).unwrap();
    assert!(block_on(engine.update_trip(trip.id, Route::new("A", "B"), 1))
        .unwrap_err()
        .is_invalid_invocation_error());
}

#[test]
fn trip_history_in_creation_order_test() {
    use tokio_test::block_on;

    let engine = engine_with(&[1, 2], &[3, 4, 5]);

    let a = block_on(engine.create_trip(1, Route::new("A", "B"), 1))
        .unwrap()
        .unwrap();
    block_on(engine.create_trip(2, Route::new("A", "B"), 1))
        .unwrap()
        .unwrap();
    let c = block_on(engine.create_trip(1, Route::new("A", "B"), 1))
        .unwrap()
        .unwrap();
    block_on(engine.withdraw_trip(a.id)).unwrap();

    let history = block_on(engine.trip_history(1)).unwrap();
    let ids: Vec<TripId> = history.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![a.id, c.id]);
    assert_eq!(history[0].status.name(), "WITHDRAWN");
    assert_eq!(history[1].status.name(), "IN_PROGRESS");
}

#[test]
fn concurrent_requests_claim_driver_once_test() {
    use crate::api::DriverAPI;
    use std::sync::Arc;

    let riders: Vec<u64> = (1..=8).collect();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(8)
        .build()
        .unwrap();

    for _ in 0..20 {
        let engine = Arc::new(engine_with(&riders, &[9]));

        let handles: Vec<_> = riders
            .iter()
            .map(|&rider_id| {
                let engine = engine.clone();
                runtime.spawn(async move {
                    engine
                        .create_trip(rider_id, Route::new("X", "Y"), 1)
                        .await
                })
            })
            .collect();

        let mut claimed = vec![];
        for handle in handles {
            if let Some(trip) = runtime.block_on(handle).unwrap().unwrap() {
                claimed.push(trip);
            }
        }

        assert_eq!(claimed.len(), 1);

        let driver = runtime.block_on(engine.find_driver(9)).unwrap().unwrap();
        assert_eq!(driver.current_trip, Some(claimed[0].id));

        let mut recorded = 0;
        for rider_id in riders.iter() {
            recorded += runtime
                .block_on(engine.trip_history(*rider_id))
                .unwrap()
                .len();
        }
        assert_eq!(recorded, 1);
    }
}
