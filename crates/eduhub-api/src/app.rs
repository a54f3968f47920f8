//! Application builder: wires router, middleware, and state into an Axum
//! app, and runs the server.

use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use eduhub_core::config::AppConfig;
use eduhub_core::error::AppError;
use eduhub_database::DatabasePool;
use eduhub_database::migration::run_migrations;

use crate::middleware::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> axum::Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the EduHub server against PostgreSQL until a shutdown signal.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting EduHub server...");

    // ── Step 1: Database connection + migrations ─────────────────
    let database = DatabasePool::connect(&config.database).await?;
    run_migrations(database.pool()).await?;

    // ── Step 2: Stores, auth, and services ───────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::postgres(config, database.clone())?;

    // ── Step 3: Build and start HTTP server ──────────────────────
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(addr = %addr, "EduHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    database.close().await;
    info!("EduHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to install Ctrl+C handler");
            warn!("Server will only stop when the process is killed");
            std::future::pending::<()>().await;
        }
    }
}
