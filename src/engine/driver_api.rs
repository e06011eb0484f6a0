use super::helpers::upsert;
use super::Engine;

use async_trait::async_trait;

use crate::{api::DriverAPI, entities::Driver, error::Error};

#[async_trait]
impl DriverAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_driver(&self, driver: Driver) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        upsert(&mut state.drivers, driver);

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find_driver(&self, id: u64) -> Result<Option<Driver>, Error> {
        let state = self.state.lock().await;

        Ok(state.drivers.iter().find(|d| d.id == id).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn available_drivers(&self) -> Result<Vec<Driver>, Error> {
        let state = self.state.lock().await;

        Ok(state
            .drivers
            .iter()
            .filter(|d| d.is_available())
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn update_driver_availability(&self, id: u64, accepting: bool) -> Result<(), Error> {
        let mut state = self.state.lock().await;

        match state.drivers.iter_mut().find(|d| d.id == id) {
            Some(driver) => {
                driver.set_accepting_riders(accepting);
                tracing::info!(status = %driver.status_string(), "driver availability updated");
            }
            None => tracing::warn!("no such driver, ignoring availability update"),
        }

        Ok(())
    }
}

#[test]
fn available_drivers_in_insertion_order_test() {
    use tokio_test::block_on;

    let engine = Engine::new();
    block_on(engine.create_driver(Driver::new(9, "Nine"))).unwrap();
    block_on(engine.create_driver(Driver::new(3, "Three"))).unwrap();
    block_on(engine.create_driver(Driver::new(5, "Five"))).unwrap();

    let ids: Vec<u64> = block_on(engine.available_drivers())
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec![9, 3, 5]);

    block_on(engine.update_driver_availability(3, false)).unwrap();

    let ids: Vec<u64> = block_on(engine.available_drivers())
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec![9, 5]);
}

#[test]
fn update_driver_availability_test() {
    use tokio_test::block_on;

    let engine = Engine::new();
    block_on(engine.create_driver(Driver::new(3, "Driver 1"))).unwrap();

    block_on(engine.update_driver_availability(3, false)).unwrap();
    let driver = block_on(engine.find_driver(3)).unwrap().unwrap();
    assert!(!driver.accepting_riders);
    assert!(!driver.is_available());

    block_on(engine.update_driver_availability(3, true)).unwrap();
    assert!(block_on(engine.find_driver(3)).unwrap().unwrap().is_available());

    // unknown driver is a silent no-op
    block_on(engine.update_driver_availability(42, false)).unwrap();
    assert_eq!(block_on(engine.find_driver(42)).unwrap(), None);
}

#[test]
fn create_driver_overwrites_test() {
    use tokio_test::block_on;

    let engine = Engine::new();
    block_on(engine.create_driver(Driver::new(3, "Old"))).unwrap();
    block_on(engine.create_driver(Driver::new(4, "Other"))).unwrap();
    block_on(engine.create_driver(Driver::new(3, "New"))).unwrap();

    let drivers = block_on(engine.available_drivers()).unwrap();
    assert_eq!(drivers.len(), 2);
    assert_eq!(drivers[0].name, "New");
}
