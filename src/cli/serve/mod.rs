//! Serve command - runs the registry auth gateway

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router;
use crate::config::AppConfig;

/// Run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let state = crate::create_app_state(&config).await?;
    let verifier = state.credential_verifier.clone();
    let app = create_router(state);

    let addr = build_socket_addr(&config)?;
    info!("Starting registry auth gateway on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    verifier.drain_usage_updates().await;

    info!("Server stopped");

    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }

    info!("Shutdown signal received");
}
