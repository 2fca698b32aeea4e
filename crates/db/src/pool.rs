//! SQLite connection pool.

use std::str::FromStr;
use std::time::Duration;

use acervo_kernel::settings::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::DbError;

/// Shared pool handle. Every store call checks a connection out and returns
/// it when the call finishes, whether it succeeded or not.
pub type DbPool = SqlitePool;

/// Open (creating if absent) the database file named by `settings.url`.
///
/// Foreign keys are switched on for every connection so that category
/// deletes cascade to books.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<DbPool, DbError> {
    info!(
        url = %settings.url,
        max_connections = settings.max_connections,
        "connecting to database"
    );

    let options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Private in-memory database on a single pinned connection.
///
/// The connection is never recycled, so the schema lives as long as the pool.
pub async fn create_memory_pool() -> Result<DbPool, DbError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}
