//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, database migrations and the Axum server lifecycle.

use crate::config::Config;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::persistence::{InMemoryUrlRepository, PgUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - URL storage (PostgreSQL with migrations, or in-memory)
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let url_repository = build_repository(&config).await?;

    let state = AppState::new(
        url_repository,
        config.base_url.clone(),
        config.env_name.clone(),
    );

    let app = app_router(state, config.rate_limit_enabled);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Selects the storage backend for the configured environment.
async fn build_repository(config: &Config) -> Result<Arc<dyn UrlRepository>> {
    if !config.uses_database() {
        tracing::warn!("No database configured, short URLs will not survive a restart");
        return Ok(Arc::new(InMemoryUrlRepository::new()));
    }

    let database_url = config.database_url.as_deref().unwrap_or_default();
    let pool = connect_pool(config, database_url).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(Arc::new(PgUrlRepository::new(Arc::new(pool))))
}

/// Opens a PostgreSQL pool using the configured limits.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlEntity;

    #[tokio::test]
    async fn test_without_database_falls_back_to_memory() {
        let config = Config::default();
        assert!(!config.uses_database());

        let repository = build_repository(&config).await.unwrap();

        assert!(repository.ping().await.is_ok());
        repository
            .create(UrlEntity::new(
                "https://example.com".to_string(),
                "abc12".to_string(),
                "abc12_AbCd1234".to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(repository.get_all().await.unwrap().len(), 1);
    }
}
