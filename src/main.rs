//! Shop Online server.
//!
//! Main entry point that wires the crates together and starts the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use shop_api::AppState;
use shop_auth::{RevocationRegistry, RevocationSweeper};
use shop_core::config::{AppConfig, StoreBackend};
use shop_core::error::AppError;
use shop_database::{
    AccountStore, DatabasePool, MemoryUserRepository, PgUserRepository, UserStore,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("SHOP_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Store handles for the selected backend.
struct Stores {
    accounts: Arc<dyn AccountStore>,
    users: Arc<dyn UserStore>,
    pool: Option<DatabasePool>,
}

async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    match config.database.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory account store; data is lost on restart");
            let repo = Arc::new(MemoryUserRepository::new());
            Ok(Stores {
                accounts: repo.clone(),
                users: repo,
                pool: None,
            })
        }
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;

            tracing::info!("Running database migrations...");
            shop_database::migration::run_migrations(pool.pool()).await?;

            let repo = Arc::new(PgUserRepository::new(pool.pool().clone()));
            Ok(Stores {
                accounts: repo.clone(),
                users: repo,
                pool: Some(pool),
            })
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.database.backend,
        "Starting Shop Online"
    );

    let stores = open_stores(&config).await?;
    let revocations = Arc::new(RevocationRegistry::new());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper =
        RevocationSweeper::from_config(Arc::clone(&revocations), &config.auth).spawn(shutdown_rx);

    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState::new(config, stores.accounts, stores.users, revocations)?;
    let app = shop_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "Shop Online listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if tokio::time::timeout(grace, sweeper).await.is_err() {
        tracing::warn!("Revocation sweeper did not stop within the grace period");
    }
    if let Some(pool) = stores.pool {
        pool.close().await;
    }

    tracing::info!("Shop Online shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
}
