//! Stream registry server entry point.

use std::sync::Arc;

use anyhow::Context;
use axum::{Router, middleware};
use stream_registry_api::{AppState, metrics_middleware, router as api_router};
use stream_registry_common::config::{LogFormat, LoggingConfig, StorageBackend, StorageConfig};
use stream_registry_common::{AppError, Config};
use stream_registry_db::Stores;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "stream_registry=info,tower_http=info";

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(logging.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER))
    });
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn build_stores(storage: &StorageConfig) -> anyhow::Result<Stores> {
    match storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory stores");
            Ok(Stores::in_memory())
        }
        StorageBackend::Postgres => {
            let database = storage.database.as_ref().ok_or_else(|| {
                AppError::Config(
                    "storage.database is required for the postgres backend".to_string(),
                )
            })?;

            let db = stream_registry_db::init(database)
                .await
                .context("Failed to connect to database")?;
            info!("Connected to database");

            info!("Running database migrations...");
            stream_registry_db::migrate(&db).await?;
            info!("Migrations completed");

            Ok(Stores::postgres(Arc::new(db)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("STREAM_REGISTRY_CONFIG") {
        Ok(path) => Config::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {path}"))?,
        Err(_) => Config::load().context("Failed to load configuration")?,
    };
    init_tracing(&config.logging);

    info!("Starting stream registry...");

    let stores = build_stores(&config.storage).await?;
    let state = AppState::new(stores);

    let app = Router::new()
        .merge(api_router())
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
