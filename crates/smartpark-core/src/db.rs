use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Establish a new Postgres connection pool for the API and admin tooling.
pub async fn connect(database_url: &str) -> Result<DbPool> {
    connect_with(database_url, DEFAULT_MAX_CONNECTIONS).await
}

pub async fn connect_with(database_url: &str, max_connections: u32) -> Result<DbPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
        .with_context(|| "failed to connect to Postgres")
}

/// Run database migrations embedded at compile-time.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .with_context(|| "failed to run database migrations")
}

/// Lightweight connectivity probe used by the health endpoint.
pub async fn ping(pool: &DbPool) -> crate::error::Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
