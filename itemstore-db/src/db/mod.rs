//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Rely on DB constraints, surface conflicts - no check-then-insert
//! - Bound parameters only - values never reach the query text

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::create_pool;
pub use repos::*;
pub use schema::create_tables;
