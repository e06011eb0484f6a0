use std::io;
use std::sync::Arc;

use rideshare::api::DynAPI;
use rideshare::cli::{self, Console};
use rideshare::config::Config;
use rideshare::engine::Engine;
use rideshare::error::Error;
use rideshare::seed::Seed;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();

    let seed = match &config.seed_path {
        Some(path) => Seed::load(path)?,
        None => Seed::default(),
    };

    let api: DynAPI = Arc::new(Engine::new());
    seed.apply(api.as_ref()).await?;

    let mut console = Console::new(io::stdin().lock(), io::stdout());

    cli::run(&api, &mut console).await
}
