//! Database connection pool setup.
//!
//! Reads the PostgreSQL connection string from the `DATABASE_URL`
//! environment variable and runs pending migrations before the pool is
//! handed to the application state.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool and applies migrations.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset, the connection fails, or a
/// migration cannot be applied. Called once at startup.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
