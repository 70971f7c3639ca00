//! Item repository
//!
//! Handles the two item statements:
//! - insert_many: multi-row INSERT with bound values (no per-row loop)
//! - find_matching: exact equality on user_id, title and description

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::StoreResult;
use crate::models::Item;

/// Postgres accepts at most this many bind parameters per statement.
const BIND_LIMIT: usize = 65_535;

const COLUMNS_PER_ROW: usize = 4;

/// Largest batch that still fits in a single INSERT statement.
pub const MAX_ROWS_PER_STATEMENT: usize = BIND_LIMIT / COLUMNS_PER_ROW;

/// Item repository
pub struct ItemRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert all items, all-or-nothing.
    ///
    /// A batch up to `MAX_ROWS_PER_STATEMENT` rows is one statement and one
    /// round trip. Larger batches are split into statements inside a single
    /// transaction so a unique violation anywhere still rolls back every row.
    /// Returns the number of rows written.
    pub async fn insert_many(&self, items: &[Item]) -> StoreResult<u64> {
        if items.is_empty() {
            return Ok(0);
        }

        if items.len() <= MAX_ROWS_PER_STATEMENT {
            let mut builder = insert_statement(items);
            let result = builder.build().execute(self.pool).await?;
            return Ok(result.rows_affected());
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for chunk in items.chunks(MAX_ROWS_PER_STATEMENT) {
            let mut builder = insert_statement(chunk);
            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        Ok(inserted)
    }

    /// Items whose user_id, title and description all equal the arguments.
    ///
    /// Ordered by item_id for stable output; callers must not rely on it.
    pub async fn find_matching(
        &self,
        user_id: i32,
        title: &str,
        description: &str,
    ) -> StoreResult<Vec<Item>> {
        let items: Vec<Item> = sqlx::query_as(
            r#"
            SELECT item_id, user_id, title, description
            FROM items
            WHERE user_id = $1
              AND title = $2
              AND description = $3
            ORDER BY item_id
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}

/// Build `INSERT INTO items (...) VALUES ($1, $2, $3, $4), (...)` for a
/// non-empty slice.
fn insert_statement(items: &[Item]) -> QueryBuilder<'_, Postgres> {
    let mut builder =
        QueryBuilder::new("INSERT INTO items (item_id, user_id, title, description) ");
    builder.push_values(items.iter(), |mut b, item| {
        b.push_bind(item.item_id)
            .push_bind(item.user_id)
            .push_bind(item.title.as_str())
            .push_bind(item.description.as_str());
    });
    builder
}
