//! # Taskbook API Server
//!
//! REST backend for personal task tracking: accounts with bearer tokens and
//! per-user task CRUD.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=$(openssl rand -hex 32) DATABASE_URL=postgresql://... cargo run -p taskbook-api
//! ```

use anyhow::Context;
use taskbook_api::{
    app::{build_router, AppState},
    config::{Config, StorageBackend},
};
use taskbook_shared::{
    db::{migrations, pool},
    store::{MemoryStore, PgStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskbook_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskbook API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env().context("Failed to load configuration")?;
    let bind_address = config.bind_address();

    let state = match config.storage {
        StorageBackend::Postgres => {
            migrations::ensure_database_exists(&config.database.url)
                .await
                .context("Failed to create database")?;

            let pool = pool::create_pool(pool::DatabaseConfig {
                url: config.database.url.clone(),
                max_connections: config.database.max_connections,
                ..Default::default()
            })
            .await
            .context("Failed to connect to database")?;

            migrations::run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;

            AppState::new(PgStore::new(pool), config)?
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store; all data is lost on shutdown");
            AppState::new(MemoryStore::new(), config)?
        }
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
