use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Route;
use crate::error::{invalid_input_error, invalid_invocation_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TripId(pub u64);

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TripId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(TripId)
            .map_err(|_| invalid_input_error())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub status: Status,
    pub rider_id: u64,
    pub driver_id: u64,
    pub route: Route,
    pub seats: u32,
    pub fare: f64,
    pub requested_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    InProgress,
    Withdrawn { timestamp: DateTime<Utc> },
    Completed { timestamp: DateTime<Utc> },
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::InProgress => "IN_PROGRESS".into(),
            Self::Withdrawn { timestamp: _ } => "WITHDRAWN".into(),
            Self::Completed { timestamp: _ } => "COMPLETED".into(),
        }
    }
}

impl Trip {
    pub fn new(
        id: TripId,
        rider_id: u64,
        driver_id: u64,
        route: Route,
        seats: u32,
        fare: f64,
    ) -> Self {
        Self {
            id,
            status: Status::InProgress,
            rider_id,
            driver_id,
            route,
            seats,
            fare,
            requested_at: Utc::now(),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self.status, Status::InProgress)
    }

    /// Replaces the route and seat count. The fare is fixed at creation and
    /// is left as is.
    #[tracing::instrument]
    pub fn update_route(&mut self, route: Route, seats: u32) -> Result<(), Error> {
        match self.status {
            Status::InProgress => {
                self.route = route;
                self.seats = seats;
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    #[tracing::instrument]
    pub fn withdraw(&mut self) -> Result<u64, Error> {
        match self.status {
            Status::InProgress => {
                self.status = Status::Withdrawn {
                    timestamp: Utc::now(),
                };
                Ok(self.driver_id)
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    #[tracing::instrument]
    pub fn end(&mut self) -> Result<u64, Error> {
        match self.status {
            Status::InProgress => {
                self.status = Status::Completed {
                    timestamp: Utc::now(),
                };
                Ok(self.driver_id)
            }
            _ => Err(invalid_invocation_error()),
        }
    }
}

#[cfg(test)]
fn sample_trip() -> Trip {
    Trip::new(TripId(1), 2, 3, Route::new("X", "Y"), 1, 0.0)
}

#[test]
fn trip_id_parse_test() {
    assert_eq!("7".parse::<TripId>().unwrap(), TripId(7));
    assert_eq!(" 12 ".parse::<TripId>().unwrap(), TripId(12));
    assert!("abc".parse::<TripId>().unwrap_err().is_invalid_input_error());
    assert!("-1".parse::<TripId>().is_err());
    assert_eq!(TripId(42).to_string(), "42");
}

#[test]
fn trip_end_test() {
    let mut trip = sample_trip();
    assert!(trip.is_in_progress());
    assert_eq!(trip.status.name(), "IN_PROGRESS");

    assert_eq!(trip.end().unwrap(), 3);
    assert_eq!(trip.status.name(), "COMPLETED");
    assert!(!trip.is_in_progress());
}

#[test]
fn trip_terminal_states_reject_transitions_test() {
    let mut trip = sample_trip();
    trip.withdraw().unwrap();
    assert_eq!(trip.status.name(), "WITHDRAWN");

    assert!(trip.withdraw().unwrap_err().is_invalid_invocation_error());
    assert!(trip.end().unwrap_err().is_invalid_invocation_error());
    assert_eq!(trip.status.name(), "WITHDRAWN");

    let mut trip = sample_trip();
    trip.end().unwrap();

    assert!(trip.withdraw().is_err());
    assert_eq!(trip.status.name(), "COMPLETED");
}

#[test]
fn trip_update_route_keeps_fare_test() {
    let mut trip = Trip::new(TripId(1), 2, 3, Route::new("A", "ABCDE"), 2, 12.0);

    trip.update_route(Route::new("A", "AB"), 4).unwrap();
    assert_eq!(trip.route, Route::new("A", "AB"));
    assert_eq!(trip.seats, 4);
    assert_eq!(trip.fare, 12.0);

    trip.end().unwrap();
    assert!(trip.update_route(Route::new("B", "C"), 1).is_err());
    assert_eq!(trip.route, Route::new("A", "AB"));
}

#[test]
fn trip_status_serialization_test() {
    let trip = sample_trip();
    let value = serde_json::to_value(&trip.status).unwrap();
    assert_eq!(value, serde_json::json!({ "name": "in_progress" }));
}
