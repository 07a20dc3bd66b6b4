//! Demo data for a freshly created database.

use sqlx::PgPool;

/// Login of the demo account.
pub const DEMO_LOGIN: &str = "ivan";

/// Display name of the demo account.
pub const DEMO_NAME: &str = "Ivanov Ivan";

/// Insert the demo user unless a user with [`DEMO_LOGIN`] already exists.
///
/// Returns `true` when a row was inserted.
pub async fn ensure_demo_user(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO users (name, login) VALUES ($1, $2)
         ON CONFLICT ON CONSTRAINT uq_users_login DO NOTHING",
    )
    .bind(DEMO_NAME)
    .bind(DEMO_LOGIN)
    .execute(pool)
    .await?;

    let inserted = result.rows_affected() > 0;
    if inserted {
        tracing::info!(login = DEMO_LOGIN, "Seeded demo user");
    }
    Ok(inserted)
}
