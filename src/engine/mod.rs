mod driver_api;
mod helpers;
mod rider_api;
mod trip_api;
mod user_api;

use std::collections::BTreeMap;

use tokio::sync::Mutex;

use crate::{
    api::API,
    auth::Registry,
    entities::{Driver, Rider, Trip, TripId},
};

#[derive(Debug, Default)]
struct State {
    users: Registry,
    riders: Vec<Rider>,
    drivers: Vec<Driver>,
    trips: BTreeMap<TripId, Trip>,
    trip_counter: u64,
}

impl State {
    fn next_trip_id(&mut self) -> TripId {
        self.trip_counter += 1;
        TripId(self.trip_counter)
    }
}

#[derive(Debug, Default)]
pub struct Engine {
    state: Mutex<State>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new")]
    pub fn new() -> Self {
        Self::default()
    }
}

impl API for Engine {}
