//! Agora API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p agora-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use agora_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting Agora API Server...");

    let config = AppConfig::from_env().inspect_err(|e| {
        error!(error = %e, "Failed to load configuration");
    })?;

    info!(
        env = ?config.app.env,
        storage = ?config.storage,
        identity = ?config.identity.mode,
        port = config.api.port,
        "Configuration loaded"
    );

    agora_api::run(config).await?;

    Ok(())
}
