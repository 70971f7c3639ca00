//! Store configuration - connection settings and environment loading
//!
//! Configuration is loaded from the environment:
//! - `DATABASE_URL`: full connection string, takes precedence when set
//! - `PGHOST`, `PGPORT`, `PGUSER`, `PGPASSWORD`, `PGDATABASE`, `PGSSLMODE`:
//!   libpq-style variables, used when `DATABASE_URL` is absent
//!
//! A `.env` file in the working directory is loaded first if present.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

use crate::error::{StoreError, StoreResult};

/// How long `connect()` waits for the first connection before giving up.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Parsed connection options for the pool
    pub connect_options: PgConnectOptions,
    /// Upper bound on waiting for a pooled connection
    pub acquire_timeout: Duration,
}

impl StoreConfig {
    /// Wrap already-built connect options with the default timeout.
    pub fn new(connect_options: PgConnectOptions) -> Self {
        Self {
            connect_options,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    /// Create config from environment variables
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` if `DATABASE_URL` is set but is not a
    /// valid connection string.
    pub fn from_env() -> StoreResult<Self> {
        let _ = dotenvy::dotenv();

        match std::env::var("DATABASE_URL") {
            Ok(url) => Self::from_url(&url),
            // PgConnectOptions::new() reads the PG* variables itself
            Err(_) => Ok(Self::new(PgConnectOptions::new())),
        }
    }

    /// Create config from an explicit connection string.
    pub fn from_url(url: &str) -> StoreResult<Self> {
        let options = PgConnectOptions::from_str(url).map_err(StoreError::Config)?;
        Ok(Self::new(options))
    }

    pub fn with_acquire_timeout(mut self, acquire_timeout: Duration) -> Self {
        self.acquire_timeout = acquire_timeout;
        self
    }
}
