//! Database connection pool management
//!
//! Uses sqlx PgPool with a fixed connection limit.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::StoreConfig;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a PostgreSQL connection pool.
///
/// Opens one connection eagerly so that an unreachable server or rejected
/// credentials fail here rather than on the first query.
///
/// # Errors
///
/// Returns an error if the connection fails or the acquire timeout elapses.
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::from_url("postgres://localhost/items")?;
/// let pool = create_pool(&config).await?;
/// ```
pub async fn create_pool(config: &StoreConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(config.connect_options.clone())
        .await
}
