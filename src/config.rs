use std::env::{self, VarError};
use std::path::PathBuf;

use tracing::Level;

use crate::error::{config_error, Error};

const LOG_VAR: &str = "RIDESHARE_LOG";
const SEED_VAR: &str = "RIDESHARE_SEED";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: Level,
    pub seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Level::ERROR,
            seed_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_vars(|key| env::var(key))
    }

    pub fn from_vars<F>(var: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let mut config = Self::default();

        if let Some(level) = optional(var(LOG_VAR))? {
            config.log_level = level.trim().parse().map_err(config_error)?;
        }

        config.seed_path = optional(var(SEED_VAR))?.map(PathBuf::from);

        Ok(config)
    }
}

fn optional(result: Result<String, VarError>) -> Result<Option<String>, Error> {
    match result {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[test]
fn config_defaults_test() {
    let config = Config::from_vars(|_| Err(VarError::NotPresent)).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.log_level, Level::ERROR);
}

#[test]
fn config_from_vars_test() {
    let config = Config::from_vars(|key| match key {
        "RIDESHARE_LOG" => Ok("debug".into()),
        "RIDESHARE_SEED" => Ok("seed.json".into()),
        _ => Err(VarError::NotPresent),
    })
    .unwrap();

    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(config.seed_path, Some(PathBuf::from("seed.json")));
}

#[test]
fn config_invalid_level_test() {
    let err = Config::from_vars(|key| match key {
        "RIDESHARE_LOG" => Ok("chatty".into()),
        _ => Err(VarError::NotPresent),
    })
    .unwrap_err();

    assert!(err.is_internal_error());
    assert_eq!(err.code, 3);
}
