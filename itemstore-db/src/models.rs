//! Item record

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user-owned listing, one row of the `items` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique across all items
    pub item_id: i32,
    /// Owning user, not enforced as a foreign key
    pub user_id: i32,
    pub title: String,
    pub description: String,
}

impl Item {
    pub fn new(
        item_id: i32,
        user_id: i32,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            item_id,
            user_id,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Whether this item matches a lookup key exactly (case-sensitive).
    pub fn matches(&self, user_id: i32, title: &str, description: &str) -> bool {
        self.user_id == user_id && self.title == title && self.description == description
    }
}
