//! Blockchain Network Discovery API - Main Entry Point

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blockchain_network_discovery::infrastructure::driven_adapters::config::AppConfig;
use blockchain_network_discovery::infrastructure::driven_adapters::BlockchainDb;
use blockchain_network_discovery::infrastructure::driving_adapters::api_rest::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first so the log format can follow it
    let config = AppConfig::load()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "blockchain_network_discovery=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
    tracing::info!("Configuration loaded successfully");

    // Create the blockchain database adapter
    let blockchain_db = Arc::new(BlockchainDb::from_config(&config.blockchain_db)?);
    tracing::info!(base_url = %config.blockchain_db.base_url, "Blockchain database client created");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = api_rest::router(AppState::new(config, blockchain_db));

    // Start server
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
