//! Booking service
//!
//! REST API for registering accounts and reserving time windows.
//! Configuration comes from the environment (and `.env`, if present).

use std::future::IntoFuture;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use booking_service::domain::RepositoryProvider;
use booking_service::infrastructure::database::migrator::Migrator;
use booking_service::shared::ShutdownCoordinator;
use booking_service::{
    create_api_router, init_database, AppConfig, AppState, InMemoryRepositoryProvider,
    SeaOrmRepositoryProvider, StorageBackend,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let app_cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app_cfg.log_level)),
        )
        .init();

    info!("Starting booking service...");
    if app_cfg.uses_default_secret() {
        warn!("JWT_SECRET is not set; signing tokens with the insecure default secret");
    }

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics recorder installed");

    // ── Storage ────────────────────────────────────────────────
    let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) = match &app_cfg.storage {
        StorageBackend::Database(db_config) => {
            let db = match init_database(db_config).await {
                Ok(db) => db,
                Err(e) => {
                    error!("Failed to connect to database: {}", e);
                    return Err(e.into());
                }
            };

            info!("Running database migrations...");
            if let Err(e) = Migrator::up(&db, None).await {
                error!("Failed to run migrations: {}", e);
                return Err(e.into());
            }
            info!("Migrations completed");

            (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on exit");
            (Arc::new(InMemoryRepositoryProvider::new()), None)
        }
    };

    // ── Services + router ──────────────────────────────────────
    let state = AppState::new(repos, &app_cfg, prometheus_handle);
    let api_router = create_api_router(state);

    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    shutdown.start_signal_listener();
    let shutdown_signal = shutdown.signal();

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_server = axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        })
        .into_future();

    match shutdown.drain(api_server).await {
        Some(Ok(())) => info!("REST API server stopped"),
        Some(Err(e)) => error!("REST API server error: {}", e),
        None => warn!("Abandoning in-flight requests"),
    }

    // ── Final cleanup ──────────────────────────────────────────
    if let Some(db) = db {
        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
    }

    info!("Booking service shutdown complete");
    Ok(())
}
