//! Lecturer Claims - API Server Binary
//!
//! This binary starts the HTTP API server for the lecturer claims system.
//!
//! # Usage
//!
//! ```bash
//! # Run with in-memory storage and demo data
//! cargo run --bin claims-api
//!
//! # Run against PostgreSQL
//! API_STORAGE=postgres API_DATABASE__URL=postgres://... cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_STORAGE` - `memory` or `postgres` (default: memory)
//! * `API_DATABASE__URL` - PostgreSQL connection string
//! * `API_DATABASE__MAX_CONNECTIONS`, `API_DATABASE__MIN_CONNECTIONS`,
//!   `API_DATABASE__ACQUIRE_TIMEOUT_SECS`, `API_DATABASE__IDLE_TIMEOUT_SECS` - pool settings
//! * `API_UPLOAD_ROOT` - Directory holding `uploads/` (default: wwwroot)
//! * `API_SEED_SAMPLE_DATA` - Seed in-memory stores (default: true)
//! * `API_CURRENCY` - Report currency code (default: USD)
//! * `API_TIMEZONE` - Institution timezone, e.g. Africa/Johannesburg (default: UTC)
//! * `API_RULES__MAX_HOURS_PER_CLAIM` and the other `API_RULES__*` limits

use anyhow::Context;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_api::{config::ApiConfig, create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, builds the storage backend and
/// starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        timezone = %config.timezone.name(),
        "Starting Lecturer Claims API Server"
    );

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("invalid server address")?;

    let state = AppState::connect(config)
        .await
        .context("failed to initialise storage")?;
    let app = create_router(state);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
