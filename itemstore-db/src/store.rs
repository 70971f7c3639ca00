//! ItemStore - pooled connection lifecycle and the item operations
//!
//! The store is an explicit value owned by the caller's composition root.
//! It holds the only shared resource (the pool) between `connect()` and
//! `disconnect()`.

use futures::future::BoxFuture;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use crate::config::StoreConfig;
use crate::db::{create_pool, create_tables, ItemRepo};
use crate::error::{StoreError, StoreResult};
use crate::models::Item;

pub struct ItemStore {
    /// None for stores wrapped around an externally built pool
    config: Option<StoreConfig>,
    pool: Option<PgPool>,
}

impl ItemStore {
    /// Create a disconnected store. Call `connect()` before anything else.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config: Some(config),
            pool: None,
        }
    }

    /// Create a disconnected store configured from the environment.
    pub fn from_env() -> StoreResult<Self> {
        Ok(Self::new(StoreConfig::from_env()?))
    }

    /// Wrap a pool the caller already owns. The store starts connected.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            config: None,
            pool: Some(pool),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.pool.as_ref().is_some_and(|pool| !pool.is_closed())
    }

    /// Open the pool. No-op if already connected.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the server is unreachable or
    /// rejects the credentials, `StoreError::Config` if the settings are
    /// invalid.
    #[instrument(skip_all)]
    pub async fn connect(&mut self) -> StoreResult<()> {
        if self.is_connected() {
            debug!("connect() on a connected store, keeping existing pool");
            return Ok(());
        }

        let config = match &self.config {
            Some(config) => config.clone(),
            None => StoreConfig::from_env()?,
        };

        let pool = create_pool(&config)
            .await
            .map_err(StoreError::connection)?;

        info!(
            host = %config.connect_options.get_host(),
            port = config.connect_options.get_port(),
            "item store connected"
        );
        self.config = Some(config);
        self.pool = Some(pool);
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to come back.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotConnected` if there is no pool to close.
    #[instrument(skip_all)]
    pub async fn disconnect(&mut self) -> StoreResult<()> {
        let pool = self.pool.take().ok_or(StoreError::NotConnected)?;
        pool.close().await;
        info!("item store disconnected");
        Ok(())
    }

    /// Create the items table. Fails with `StoreError::Schema` if it exists.
    #[instrument(skip_all)]
    pub async fn create_schema(&self) -> StoreResult<()> {
        create_tables(self.pool()?).await
    }

    /// Insert every item in one statement. Empty input is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateKey` if any `item_id` already exists or
    /// repeats within the batch. No rows are written in that case.
    #[instrument(skip_all, fields(count = items.len()))]
    pub async fn save_items(&self, items: &[Item]) -> StoreResult<()> {
        let pool = self.pool()?;
        if items.is_empty() {
            debug!("empty batch, nothing to insert");
            return Ok(());
        }

        let inserted = ItemRepo::new(pool).insert_many(items).await?;
        debug!(inserted, "items saved");
        Ok(())
    }

    /// Items with exactly this owner, title and description.
    ///
    /// Despite the name this is exact, case-sensitive equality, not fuzzy
    /// matching. An empty result is not an error.
    #[instrument(skip(self, title, description))]
    pub async fn find_similar_items(
        &self,
        user_id: i32,
        title: &str,
        description: &str,
    ) -> StoreResult<Vec<Item>> {
        let items = ItemRepo::new(self.pool()?)
            .find_matching(user_id, title, description)
            .await?;
        debug!(found = items.len(), "lookup complete");
        Ok(items)
    }

    fn pool(&self) -> StoreResult<&PgPool> {
        match &self.pool {
            Some(pool) if !pool.is_closed() => Ok(pool),
            _ => Err(StoreError::NotConnected),
        }
    }
}

impl Drop for ItemStore {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("item store dropped while connected, pool released without disconnect()");
        }
    }
}

/// Run `f` against a connected store, disconnecting on every exit path.
///
/// An error from `f` wins over an error from closing the pool.
///
/// ```ignore
/// let found = with_connected(StoreConfig::from_env()?, |store| {
///     Box::pin(async move { store.find_similar_items(42, "Bike", "Red bike").await })
/// })
/// .await?;
/// ```
pub async fn with_connected<T, F>(config: StoreConfig, f: F) -> StoreResult<T>
where
    F: for<'s> FnOnce(&'s ItemStore) -> BoxFuture<'s, StoreResult<T>>,
{
    let mut store = ItemStore::new(config);
    store.connect().await?;

    let result = f(&store).await;
    let closed = store.disconnect().await;

    match (result, closed) {
        (Err(err), _) => Err(err),
        (Ok(_), Err(err)) => Err(err),
        (Ok(value), Ok(())) => Ok(value),
    }
}
