use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travelhunt_api::config::ServerConfig;
use travelhunt_api::router::build_app_router;
use travelhunt_api::state::AppState;
use travelhunt_events::{ActivityLog, EventBus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "travelhunt_api=debug,travelhunt_pipeline=debug,tower_http=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        trips_file = ?config.trips_file,
        restrict_places = config.restrict_places_to_catalog,
        "Loaded server configuration"
    );

    // --- Trip store ---
    let repository = travelhunt_db::open_repository(config.trips_file.clone());
    repository
        .health_check()
        .await
        .context("Trip store health check failed")?;

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let activity_handle = tokio::spawn(ActivityLog::run(event_bus.subscribe()));

    // --- App state ---
    let state = AppState::new(&config, repository, Arc::clone(&event_bus));
    let restored = state
        .planner
        .restore()
        .await
        .context("Failed to restore stored trips")?;
    tracing::info!(restored, "Trip planner ready");

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // The router (and its state) is gone; dropping the last bus handle
    // closes the channel so the activity log drains and exits.
    drop(event_bus);
    let _ = tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        activity_handle,
    )
    .await;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
