//! HTTP server initialization and runtime setup.
//!
//! Builds the store, wires services, and drives the Axum server lifecycle.

use crate::config::{Config, mask_connection_string};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The link store: a PostgreSQL pool (with migrations applied) when a
///   database is configured, the in-memory store otherwise
/// - Application services over the injected store handle
/// - Axum HTTP server with graceful ctrl-c shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;

    let state = AppState::new(store, config.base_url.clone());
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn build_store(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(url)
                .await?;
            tracing::info!("Connected to database at {}", mask_connection_string(url));

            sqlx::migrate!("./migrations").run(&pool).await?;

            Ok(Arc::new(PgLinkRepository::new(
                Arc::new(pool),
                config.store_timeout(),
            )))
        }
        None => {
            tracing::warn!(
                "No database configured, using in-memory store; links will not survive a restart"
            );
            Ok(Arc::new(MemoryLinkRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
