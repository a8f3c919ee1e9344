//! Connection pool and schema bootstrap

use hookcast::DomainError;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::StoreConfig;

use super::error::map_sqlx_error;

/// Open a connection pool
pub async fn connect(config: &StoreConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await
        .map_err(map_sqlx_error)?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool connected"
    );
    Ok(pool)
}

/// Apply the bundled `webhooks`/`messages` schema
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| DomainError::Persistence(format!("Failed to run migrations: {e}")))?;

    tracing::info!("Database migrations completed");
    Ok(())
}
