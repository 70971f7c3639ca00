//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Multi-row writes go out as one statement (no per-row loop)
//! - Constraint violations are surfaced, never pre-checked

pub mod items;

pub use items::{ItemRepo, MAX_ROWS_PER_STATEMENT};
