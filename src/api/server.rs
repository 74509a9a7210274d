//! HTTP server lifecycle

use crate::api::router::build_router;
use crate::bridge::Bridge;
use crate::core::error::Result;
use std::sync::Arc;

/// Serve the API on `addr` until Ctrl-C
pub async fn serve(bridge: Arc<Bridge>, addr: &str) -> Result<()> {
    let app = build_router(bridge);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Shortlist bridge listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shortlist bridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
