//! Leaderboard client binary.
//!
//! Main entry point for the leaderboard client.
//!
//! # Architecture
//!
//! This binary is the composition root that assembles:
//! 1. Runtime (sync worker over the HTTP gateway) via RuntimeBuilder
//! 2. Frontend (UI) - CLI, GUI, etc.
//!
//! Both are built independently and injected into the Client container.
//!
//! # Features
//!
//! - `frontend-cli`: Terminal-based UI (default)
//!
//! # Examples
//!
//! ```bash
//! LEADERBOARD_API_BASE_URL=http://localhost:5000 cargo run -p leaderboard-client
//! ```

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(feature = "frontend-cli")]
    {
        run_cli().await?;
    }

    #[cfg(not(feature = "frontend-cli"))]
    {
        compile_error!("At least one frontend feature must be enabled (frontend-cli, etc.)");
    }

    Ok(())
}

/// Run the CLI frontend.
#[cfg(feature = "frontend-cli")]
async fn run_cli() -> Result<()> {
    use client_bootstrap::{ClientConfig, RuntimeBuilder};
    use client_frontend_cli::{CliConfig, CliFrontend, FrontendConfig, logging};
    use leaderboard_client::Client;

    // 1. Load configuration from environment
    let client_config = ClientConfig::from_env()?;
    let frontend_config = FrontendConfig::from_env();
    let cli_config = CliConfig::from_env();

    // 2. Setup logging
    logging::setup_logging(cli_config.session_id.as_deref())?;

    tracing::info!("Starting leaderboard client");
    tracing::info!("API base URL: {}", client_config.gateway.base_url());
    tracing::info!(
        "History page size: {}",
        client_config.runtime.page_size.rows()
    );

    // 3. Build Runtime (independent layer)
    tracing::debug!("Building runtime...");
    let setup = RuntimeBuilder::new(client_config).build()?;

    tracing::info!("Runtime built with gateway {}", setup.gateway.name());

    // 4. Build Frontend (independent layer)
    tracing::debug!("Building CLI frontend...");
    let frontend = CliFrontend::new(frontend_config, cli_config);

    // 5. Build and run
    let client = Client::builder()
        .runtime(setup.runtime)
        .frontend(frontend)
        .build()?;

    tracing::info!("Client assembled, starting...");
    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
