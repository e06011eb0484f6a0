use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    api::{DriverAPI, RiderAPI, UserAPI, API},
    auth::{Role, User},
    entities::{Driver, Rider},
    error::Error,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub users: Vec<SeedUser>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedUser {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            users: vec![
                SeedUser {
                    id: 1,
                    username: "admin".into(),
                    password: "admin123".into(),
                    role: Role::Admin,
                    name: None,
                },
                SeedUser {
                    id: 2,
                    username: "rider1".into(),
                    password: "pass123".into(),
                    role: Role::Rider,
                    name: None,
                },
                SeedUser {
                    id: 3,
                    username: "driver1".into(),
                    password: "pass123".into(),
                    role: Role::Driver,
                    name: Some("Driver 1".into()),
                },
            ],
        }
    }
}

impl Seed {
    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, Error> {
        let data = fs::read_to_string(path)?;
        let seed = serde_json::from_str(&data)?;

        Ok(seed)
    }

    #[tracing::instrument(skip_all, fields(users = self.users.len()))]
    pub async fn apply<A: API + ?Sized>(&self, api: &A) -> Result<(), Error> {
        for seeded in self.users.iter() {
            let user = User::new(
                seeded.id,
                seeded.username.clone(),
                seeded.password.clone(),
                seeded.role,
            );
            api.add_user(user).await?;

            match seeded.role {
                Role::Rider => api.create_rider(Rider::new(seeded.id)).await?,
                Role::Driver => {
                    let name = seeded
                        .name
                        .clone()
                        .unwrap_or_else(|| seeded.username.clone());
                    api.create_driver(Driver::new(seeded.id, name)).await?
                }
                Role::Admin => (),
            }
        }

        tracing::info!("seeded users");

        Ok(())
    }
}

#[test]
fn default_seed_test() {
    use crate::engine::Engine;
    use tokio_test::block_on;

    let engine = Engine::new();
    block_on(Seed::default().apply(&engine)).unwrap();

    let admin = block_on(engine.authenticate("admin", "admin123"))
        .unwrap()
        .unwrap();
    assert_eq!(admin.role, Role::Admin);

    let rider = block_on(engine.authenticate("rider1", "pass123"))
        .unwrap()
        .unwrap();
    assert_eq!(rider.id, 2);
    assert_eq!(rider.role, Role::Rider);
    assert!(block_on(engine.authenticate("rider1", "wrong"))
        .unwrap()
        .is_none());
    assert!(block_on(engine.find_rider(2)).unwrap().is_some());

    let driver = block_on(engine.find_driver(3)).unwrap().unwrap();
    assert_eq!(driver.name, "Driver 1");
    assert!(driver.is_available());

    assert!(block_on(engine.find_rider(1)).unwrap().is_none());
    assert!(block_on(engine.find_driver(1)).unwrap().is_none());
}

#[test]
fn seed_from_json_test() {
    use crate::engine::Engine;
    use tokio_test::block_on;

    let seed: Seed = serde_json::from_str(
        r#"{
            "users": [
                { "id": 10, "username": "d10", "password": "x", "role": "driver" },
                { "id": 11, "username": "d11", "password": "y", "role": "driver", "name": "Eleven" }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(seed.users.len(), 2);
    assert_eq!(seed.users[0].name, None);

    let engine = Engine::new();
    block_on(seed.apply(&engine)).unwrap();

    let drivers = block_on(engine.available_drivers()).unwrap();
    assert_eq!(drivers[0].name, "d10");
    assert_eq!(drivers[1].name, "Eleven");
}

#[test]
fn seed_load_missing_file_test() {
    let err = Seed::load(Path::new("/nonexistent/rideshare-seed.json")).unwrap_err();
    assert!(err.is_internal_error());
}
