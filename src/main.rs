//! Autos API server binary.
//!
//! All configuration comes from the environment (optionally a `.env` file);
//! see `config::loader` for the variables.

use autos_api::config::{load_config, load_dotenv};
use autos_api::lifecycle;
use autos_api::observability::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = load_dotenv()?;
    let config = load_config()?;
    init_logging(&config);

    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "autos-api starting");

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
