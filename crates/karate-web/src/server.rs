//! Server bootstrap

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{AppState, Error, KarateConfig, create_router};

/// Bind, serve until Ctrl-C, then shut down gracefully.
///
/// # Errors
///
/// Returns error if the bind address or CORS origin is invalid, or the
/// listener cannot be bound.
pub async fn run_server(config: KarateConfig) -> Result<(), Error> {
    let addr = config.server.socket_addr()?;
    let state = AppState::karate_club(&config);
    let app = create_router(state, &config.server)?;

    let listener = TcpListener::bind(addr).await?;
    info!("Karate Club API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
