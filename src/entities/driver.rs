use serde::{Deserialize, Serialize};

use crate::entities::TripId;
use crate::error::{invalid_invocation_error, Error};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: u64,
    pub name: String,
    pub accepting_riders: bool,
    pub current_trip: Option<TripId>,
}

impl Driver {
    pub fn new(user_id: u64, name: impl Into<String>) -> Self {
        Self {
            id: user_id,
            name: name.into(),
            accepting_riders: true,
            current_trip: None,
        }
    }

    pub fn status_string(&self) -> String {
        match (&self.current_trip, self.accepting_riders) {
            (Some(_), _) => "ASSIGNED".into(),
            (None, true) => "AVAILABLE".into(),
            (None, false) => "IDLE".into(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.accepting_riders && self.current_trip.is_none()
    }

    pub fn set_accepting_riders(&mut self, accepting: bool) {
        self.accepting_riders = accepting;
    }

    #[tracing::instrument]
    pub fn assign(&mut self, trip_id: TripId) -> Result<(), Error> {
        if !self.is_available() {
            return Err(invalid_invocation_error());
        }

        self.current_trip = Some(trip_id);
        Ok(())
    }

    #[tracing::instrument]
    pub fn free(&mut self) {
        self.current_trip = None;
    }
}

#[test]
fn driver_availability_test() {
    let mut driver = Driver::new(3, "Driver 1");
    assert!(driver.is_available());
    assert_eq!(driver.status_string(), "AVAILABLE");

    driver.set_accepting_riders(false);
    assert!(!driver.is_available());
    assert_eq!(driver.status_string(), "IDLE");

    driver.set_accepting_riders(true);
    driver.assign(TripId(1)).unwrap();
    assert!(!driver.is_available());
    assert_eq!(driver.current_trip, Some(TripId(1)));
    assert_eq!(driver.status_string(), "ASSIGNED");

    driver.free();
    assert!(driver.is_available());
}

#[test]
fn driver_single_active_trip_test() {
    let mut driver = Driver::new(3, "Driver 1");
    driver.assign(TripId(1)).unwrap();

    let err = driver.assign(TripId(2)).unwrap_err();
    assert!(err.is_invalid_invocation_error());
    assert_eq!(driver.current_trip, Some(TripId(1)));

    let mut off_duty = Driver::new(4, "Driver 2");
    off_duty.set_accepting_riders(false);
    assert!(off_duty.assign(TripId(3)).is_err());
    assert_eq!(off_duty.current_trip, None);
}
