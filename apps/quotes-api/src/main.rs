//! # Quotebook API
//!
//! HTTP server for the quote collection.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ApiConfig::load()  ◄── QUOTES_* environment variables                 │
//! │       │                                                                 │
//! │       ├── backend = memory ──► MemoryQuoteStore (sample quotes)        │
//! │       └── backend = sqlite ──► Database::new (pool + migrations)       │
//! │                                   └── QUOTES_SEED ──► seed_if_empty    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  axum::serve(listener, router) ── Ctrl+C / SIGTERM ──► shutdown        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quotes_api::config::{ApiConfig, Backend};
use quotes_api::{router, AppState};
use quotes_db::{seed, Database, DbConfig, MemoryQuoteStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Quotebook API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        backend = ?config.backend,
        "Configuration loaded"
    );

    let state = match config.backend {
        Backend::Memory => {
            AppState::memory(MemoryQuoteStore::with_quotes(seed::sample_quotes()))
        }
        Backend::Sqlite => {
            let db_config = DbConfig::new(&config.db_path).max_connections(config.db_max_connections);
            let db = Database::new(db_config).await?;
            info!(path = %config.db_path.display(), "Connected to SQLite");

            if config.seed {
                seed::seed_if_empty(&db.quotes()).await?;
            }
            AppState::sqlite(db)
        }
    };
    let db = state.db.clone();

    let addr = SocketAddr::new(config.bind_addr, config.port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        db.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quotes=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
