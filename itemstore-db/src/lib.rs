//! itemstore-db: pooled PostgreSQL access for user-owned items
//!
//! One table, one batched insert, one exact-match lookup. `ItemStore` owns
//! the pool; `with_connected` scopes it so the pool is closed on every exit
//! path.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use models::Item;
pub use store::{with_connected, ItemStore};
