//! # Storefront API Server
//!
//! HTTP server for the product catalog and shopping carts.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  init_tracing()          RUST_LOG or "info,storefront=debug,sqlx=warn"  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiConfig::load()       .env + STOREFRONT_* variables                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new()         open SQLite, run migrations                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  axum::serve()           until Ctrl-C / SIGTERM, then close the pool   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use storefront_api::config::ApiConfig;
use storefront_db::Database;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting storefront API server...");

    let config = ApiConfig::load().context("loading configuration")?;
    info!(
        addr = %config.bind_addr(),
        db_path = %config.db_path.display(),
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("opening database")?;
    info!("Database ready");

    let app = storefront_api::router(db.clone());

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("binding {}", config.bind_addr()))?;
    info!(addr = %config.bind_addr(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
