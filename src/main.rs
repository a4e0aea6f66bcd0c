// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use std::sync::Arc;

use homehub_exporter::{
    AppState, Config, Exporter, HubClient, MetricsRegistry, Result, create_router,
};
use secrecy::ExposeSecret;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may carry RUST_LOG
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = Config::load().map_err(|e| {
        tracing::warn!("Invalid configuration: {}", e);
        e
    })?;

    tracing::info!(
        "Exporting Home Hub at {} as '{}'",
        config.hub_base_url(),
        config.username
    );
    if config.password.expose_secret().is_empty() {
        tracing::warn!("No router password configured");
    }

    let addr = config.listen_socket_addr().map_err(|e| {
        tracing::error!("Invalid listen address: {}", e);
        e
    })?;

    // Login happens once; without a session no scrape can succeed.
    let client = HubClient::new(&config)?;
    client.login().await.map_err(|e| {
        tracing::error!("Login to {} failed: {}", config.hub_base_url(), e);
        e
    })?;

    let state = Arc::new(AppState {
        exporter: Exporter::new(Arc::new(client)),
        metrics: MetricsRegistry::new(),
    });

    // graceful shutdown
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind address: {}", e);
        e
    })?;

    tracing::info!("Home Hub Exporter starting on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /        - Landing page");
    tracing::info!("  - GET /health  - Health check");
    tracing::info!("  - GET /metrics - Prometheus metrics");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            tracing::info!("HTTP server shutting down");
        })
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    Ok(())
}

fn setup_tracing() {
    // RUST_LOG wins; "info" otherwise
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
