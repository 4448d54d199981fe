//! SQLite pool construction.
//!
//! [`create_pool`] opens (or creates) the database behind `database_url`,
//! sizes the pool, and applies the embedded migrations under `migrations/`.
//! Both the binary and every test go through it, so the schema is always
//! current before the first query.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::AppError;

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a pool with [`DEFAULT_MAX_CONNECTIONS`] and run migrations.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, AppError> {
    create_pool_with(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a pool with an explicit connection cap and run migrations.
///
/// In-memory URLs are pinned to a single connection that is never
/// retired: every SQLite connection to `:memory:` is a separate database.
pub async fn create_pool_with(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = if is_in_memory(database_url) {
        // The database lives only as long as its connection, so it must
        // never be reaped or recycled.
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };
    let max_connections = pool_options.get_max_connections();

    let pool = pool_options.connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::debug!(max_connections, "SQLite pool ready");
    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
