use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::User;
use crate::entities::{Driver, Rider, Route, Trip, TripId};
use crate::error::Error;

#[async_trait]
pub trait UserAPI {
    async fn add_user(&self, user: User) -> Result<(), Error>;
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, Error>;
}

#[async_trait]
pub trait RiderAPI {
    async fn create_rider(&self, rider: Rider) -> Result<(), Error>;
    async fn find_rider(&self, id: u64) -> Result<Option<Rider>, Error>;
}

#[async_trait]
pub trait DriverAPI {
    async fn create_driver(&self, driver: Driver) -> Result<(), Error>;
    async fn find_driver(&self, id: u64) -> Result<Option<Driver>, Error>;
    async fn available_drivers(&self) -> Result<Vec<Driver>, Error>;
    async fn update_driver_availability(&self, id: u64, accepting: bool) -> Result<(), Error>;
}

#[async_trait]
pub trait TripAPI {
    async fn create_trip(
        &self,
        rider_id: u64,
        route: Route,
        seats: u32,
    ) -> Result<Option<Trip>, Error>;
    async fn find_trip(&self, id: TripId) -> Result<Trip, Error>;
    async fn update_trip(&self, id: TripId, route: Route, seats: u32) -> Result<Trip, Error>;
    async fn withdraw_trip(&self, id: TripId) -> Result<Trip, Error>;
    async fn end_trip(&self, id: TripId) -> Result<Trip, Error>;
    async fn trip_history(&self, rider_id: u64) -> Result<Vec<Trip>, Error>;
}

pub trait API: UserAPI + RiderAPI + DriverAPI + TripAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
