use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

/// Opens a connection pool to the SQLite database at [db_url], creating the database file
/// if it doesn't exist yet.
pub async fn connect_sqlx(db_url: &str) -> Result<SqlitePool, anyhow::Error> {
    let connect_options = SqliteConnectOptions::from_str(db_url)
        .with_context(|| format!("parsing database URL {db_url}"))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
        .context("connecting to the todo database")?;

    Ok(pool)
}

/// Opens a pool backed by a private in-memory database. Every in-memory connection is its own
/// database, so the pool is pinned to exactly one connection which is never recycled.
pub async fn connect_in_memory() -> Result<SqlitePool, anyhow::Error> {
    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .context("opening an in-memory database")?;

    Ok(pool)
}

/// Applies the embedded schema migrations so the `todos` table exists
pub async fn migrate(pool: &SqlitePool) -> Result<(), anyhow::Error> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("running database migrations")?;
    info!("Database schema is up to date");

    Ok(())
}
