use std::sync::Arc;

use anyhow::{Context, Result};
use taskboard::api::{AppState, router};
use taskboard::config::{ServerConfig, StoreLocation};
use taskboard::store::{JsonFileStore, MemoryTaskStore, TaskStore};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Loads `.env` first so RUST_LOG from it reaches the filter below.
    let config = ServerConfig::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store: Arc<dyn TaskStore> = match &config.store {
        StoreLocation::Memory => {
            tracing::info!("using in-memory task store");
            Arc::new(MemoryTaskStore::new())
        }
        StoreLocation::File(path) => {
            let store = JsonFileStore::new(path.clone());
            tracing::info!(path = %store.path().display(), "using JSON file task store");
            Arc::new(store)
        }
    };

    let app = router(AppState::new(store));

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {bind_address}"))?;
    tracing::info!("task service listening on http://{bind_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("task service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "could not listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
