//! SQLite pool construction for the repository.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Owns the SQLite pool behind [`super::BotRepository`].
///
/// The database file is created on first open. Foreign keys are switched
/// on for every connection so user deletion cascades to alerts and
/// customs. In-memory URLs are pinned to a single connection, since each
/// SQLite `:memory:` connection is otherwise its own database.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Opens a pool for `sqlite:path` or `sqlite::memory:` URLs.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!(database_url = %database_url, "Opening SQLite pool");

        let connect = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect)
            .await?;

        Ok(Self { pool })
    }

    /// The pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
