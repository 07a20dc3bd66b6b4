use itemstore_db::repositories::UserRepo;
use itemstore_db::seed::{ensure_demo_user, DEMO_LOGIN, DEMO_NAME};
use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    itemstore_db::health_check(&pool).await.unwrap();

    for table in ["users", "items"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Seeding inserts the demo user exactly once.
#[sqlx::test(migrations = "./migrations")]
async fn test_demo_seed_is_idempotent(pool: PgPool) {
    assert!(ensure_demo_user(&pool).await.unwrap());
    assert!(!ensure_demo_user(&pool).await.unwrap());

    let user = UserRepo::find_by_login(&pool, DEMO_LOGIN)
        .await
        .unwrap()
        .expect("demo user should exist");
    assert_eq!(user.name, DEMO_NAME);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

/// Sessions opened through `DbConfig` report the configured application name.
#[sqlx::test(migrations = "./migrations")]
async fn test_application_name_is_reported(pool: PgPool) {
    let database: (String,) = sqlx::query_as("SELECT current_database()")
        .fetch_one(&pool)
        .await
        .unwrap();

    let mut config = itemstore_db::DbConfig::from_env().unwrap();
    config.application_name = "itemstore-bootstrap-test".to_string();
    let options = config.connect_options().unwrap().database(&database.0);
    let own_pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    let name: (String,) = sqlx::query_as("SELECT current_setting('application_name')")
        .fetch_one(&own_pool)
        .await
        .unwrap();
    assert_eq!(name.0, "itemstore-bootstrap-test");
}
