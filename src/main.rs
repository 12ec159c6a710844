//! Hubs API - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Pick the hub store: PostgreSQL (pool + migrations) when `DATABASE_URL`
//!    is set, in-memory otherwise
//! 3. Build the request pipeline once
//! 4. Start server on configured port

use hubs_api::{
    app, config, db,
    services::{memory::MemoryHubStore, postgres::PgHubStore},
    state::AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let state = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url, config.database_max_connections).await?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool).await?;
            tracing::info!("Database migrations complete");

            AppState::new(PgHubStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, hubs are kept in memory");
            AppState::new(MemoryHubStore::new())
        }
    };

    // Middleware chain and routes are wired once here and never change
    let app = app::build_app(state, &config);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
