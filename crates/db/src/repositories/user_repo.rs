//! Repository for the `users` table.

use futures::stream::BoxStream;
use itemstore_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, login";

/// Full-table scan for [`UserRepo::stream_all`]. Kept as a `'static` literal
/// because the returned stream borrows its SQL.
const STREAM_ALL_QUERY: &str = "SELECT id, name, login FROM users ORDER BY id ASC";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Uses `input.id` verbatim when supplied, otherwise the next sequence
    /// value. A duplicate login fails with a unique violation on
    /// `uq_users_login`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, name, login)
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('users', 'id'))), $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.login)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by login (case-sensitive).
    pub async fn find_by_login(pool: &PgPool, login: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE login = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    /// Stream every user ordered by ID ascending.
    ///
    /// Rows are pulled from the server cursor as the stream is polled. The
    /// connection stays checked out of the pool until the stream is
    /// exhausted or dropped.
    pub fn stream_all(pool: &PgPool) -> BoxStream<'_, Result<User, sqlx::Error>> {
        sqlx::query_as::<_, User>(STREAM_ALL_QUERY).fetch(pool)
    }
}
