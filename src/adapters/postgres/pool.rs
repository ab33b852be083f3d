//! Connection pool setup.

use secrecy::ExposeSecret;
use sqlx::migrate;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens a pool and applies pending migrations from `migrations/`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(config.url.expose_secret())
        .await
        .map_err(|e| DomainError::database("connect", e))?;

    migrate!()
        .run(&pool)
        .await
        .map_err(|e| DomainError::database("run migrations", e))?;

    tracing::info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}
