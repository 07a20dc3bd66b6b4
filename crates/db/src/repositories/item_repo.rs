//! Repository for the `items` table.

use itemstore_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::{CreateItem, Item, UpdateItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, weight, released, user_id";

/// Provides CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the created row.
    ///
    /// Fails with a foreign key violation on `fk_items_user_id` when the
    /// owner does not exist.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (id, title, weight, released, user_id)
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('items', 'id'))), $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(input.id)
            .bind(&input.title)
            .bind(input.weight)
            .bind(input.released)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find an item by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update an item. Only supplied fields in `input` are applied.
    ///
    /// `released` uses `Option<Option<_>>` so an explicit `null` clears it.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let released_provided = input.released.is_some();
        let released_value = input.released.flatten();

        let query = format!(
            "UPDATE items SET
                title    = COALESCE($2, title),
                weight   = COALESCE($3, weight),
                released = CASE WHEN $4 THEN $5 ELSE released END,
                user_id  = COALESCE($6, user_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.weight)
            .bind(released_provided)
            .bind(released_value)
            .bind(input.user_id)
            .fetch_optional(pool)
            .await
    }
}
