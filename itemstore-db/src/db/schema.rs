//! Items table definition
//!
//! One-time setup, not part of steady-state request handling. A second
//! run fails because the table already exists.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

pub const CREATE_ITEMS_TABLE: &str = r#"
    CREATE TABLE items (
        item_id INT NOT NULL UNIQUE,
        user_id INT NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL
    )
"#;

/// Create the items table.
///
/// # Errors
///
/// Returns `StoreError::Schema` if the table already exists or the DDL is
/// otherwise rejected, `StoreError::Connection` if the pool cannot reach the
/// server.
pub async fn create_tables(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Creating items table...");

    sqlx::query(CREATE_ITEMS_TABLE)
        .execute(pool)
        .await
        .map_err(StoreError::schema)?;

    tracing::info!("Items table created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ddl_declares_all_columns_not_null() {
        for column in ["item_id INT", "user_id INT", "title TEXT", "description TEXT"] {
            let line = CREATE_ITEMS_TABLE
                .lines()
                .find(|line| line.trim_start().starts_with(column))
                .unwrap_or_else(|| panic!("missing column {column}"));
            assert!(line.contains("NOT NULL"), "{column} must be NOT NULL");
        }
        assert!(CREATE_ITEMS_TABLE.contains("item_id INT NOT NULL UNIQUE"));
        assert!(!CREATE_ITEMS_TABLE.contains("IF NOT EXISTS"));
    }
}
