use anyhow::Result;
use crimestat_core::AppConfig;
use crimestat_http::{AppState, create_router};
use crimestat_storage::StorageBackend;
use std::sync::Arc;

use crate::require_database_url;

pub(crate) async fn run(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    memory: bool,
) -> Result<()> {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let storage = if memory {
        tracing::warn!("Using in-memory storage; records are lost on exit");
        StorageBackend::new_memory()
    } else {
        StorageBackend::new_postgres(require_database_url(&config)?).await?
    };

    let state = Arc::new(AppState::new(Arc::new(storage), config.thresholds));
    let router = create_router(state);
    let addr = config.bind_addr();
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
