use super::helpers::upsert;
use super::Engine;

use async_trait::async_trait;

use crate::{api::RiderAPI, entities::Rider, error::Error};

#[async_trait]
impl RiderAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_rider(&self, rider: Rider) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        upsert(&mut state.riders, rider);

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find_rider(&self, id: u64) -> Result<Option<Rider>, Error> {
        let state = self.state.lock().await;

        Ok(state.riders.iter().find(|r| r.id == id).cloned())
    }
}

#[test]
fn find_rider_test() {
    use tokio_test::block_on;

    let engine = Engine::new();
    assert_eq!(block_on(engine.find_rider(2)).unwrap(), None);

    block_on(engine.create_rider(Rider::new(2))).unwrap();
    assert_eq!(block_on(engine.find_rider(2)).unwrap(), Some(Rider::new(2)));
    assert_eq!(block_on(engine.find_rider(3)).unwrap(), None);
}
