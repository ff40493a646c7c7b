//! Bot repository: persistence for users, alerts, and custom settings.
//!
//! Uses SqlitePoolManager and the row models. Get-or-create semantics for
//! users and alerts; upsert for customs. Listing is ordered by creation.

use chrono::Utc;
use tracing::info;

use super::error::StorageError;
use super::models::{AlertRecord, CustomRecord, UserRecord};
use super::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct BotRepository {
    pool_manager: SqlitePoolManager,
}

impl BotRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uid INTEGER NOT NULL UNIQUE,
                username TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS alerts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                symbol TEXT NOT NULL,
                timeframe TEXT NOT NULL,
                ma_fast INTEGER NOT NULL,
                ma_slow INTEGER NOT NULL,
                ma_type TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS customs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, key)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_alerts_user_id ON alerts(user_id)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_customs_user_id ON customs(user_id)")
            .execute(pool)
            .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// Fetches the user with the given Telegram uid, creating it if absent.
    ///
    /// Returns the record and whether it was created by this call. The
    /// username is only written on creation. Concurrent calls for the same
    /// uid can race; the UNIQUE constraint makes the loser fail rather than
    /// duplicate.
    pub async fn get_or_create_user(
        &self,
        uid: i64,
        username: Option<&str>,
    ) -> Result<(UserRecord, bool), StorageError> {
        let pool = self.pool_manager.pool();

        if let Some(user) = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE uid = ?")
            .bind(uid)
            .fetch_optional(pool)
            .await?
        {
            return Ok((user, false));
        }

        let result = sqlx::query("INSERT INTO users (uid, username, created_at) VALUES (?, ?, ?)")
            .bind(uid)
            .bind(username)
            .bind(Utc::now())
            .execute(pool)
            .await?;

        let user = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await?;

        info!(uid = uid, "Registered new user");
        Ok((user, true))
    }

    /// Fetches an alert matching the full distinguishing tuple, creating it
    /// if absent. Returns the record and whether it was created.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_or_create_alert(
        &self,
        user_id: i64,
        symbol: &str,
        timeframe: &str,
        ma_fast: i64,
        ma_slow: i64,
        ma_type: &str,
    ) -> Result<(AlertRecord, bool), StorageError> {
        let pool = self.pool_manager.pool();

        let existing = sqlx::query_as::<_, AlertRecord>(
            r#"
            SELECT * FROM alerts
            WHERE user_id = ? AND symbol = ? AND timeframe = ?
              AND ma_fast = ? AND ma_slow = ? AND ma_type = ?
            "#,
        )
        .bind(user_id)
        .bind(symbol)
        .bind(timeframe)
        .bind(ma_fast)
        .bind(ma_slow)
        .bind(ma_type)
        .fetch_optional(pool)
        .await?;

        if let Some(alert) = existing {
            return Ok((alert, false));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO alerts (user_id, symbol, timeframe, ma_fast, ma_slow, ma_type, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(symbol)
        .bind(timeframe)
        .bind(ma_fast)
        .bind(ma_slow)
        .bind(ma_type)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        let alert = sqlx::query_as::<_, AlertRecord>("SELECT * FROM alerts WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await?;

        info!(user_id = user_id, symbol = symbol, "Created alert");
        Ok((alert, true))
    }

    /// Returns the user's alerts ordered by creation.
    pub async fn alerts_for_user(&self, user_id: i64) -> Result<Vec<AlertRecord>, StorageError> {
        let alerts = sqlx::query_as::<_, AlertRecord>(
            "SELECT * FROM alerts WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(alerts)
    }

    /// Deletes an alert by id; returns true if a row was deleted.
    pub async fn delete_alert(&self, alert_id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = ?")
            .bind(alert_id)
            .execute(self.pool_manager.pool())
            .await?;

        let deleted = result.rows_affected() > 0;
        info!(alert_id = alert_id, deleted = deleted, "Delete alert");
        Ok(deleted)
    }

    /// Inserts or replaces the custom setting for `(user_id, key)`.
    pub async fn upsert_custom(
        &self,
        user_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO customs (user_id, key, value, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id, key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        info!(user_id = user_id, key = key, "Saved custom setting");
        Ok(())
    }

    /// Returns the user's custom settings ordered by creation.
    pub async fn customs_for_user(&self, user_id: i64) -> Result<Vec<CustomRecord>, StorageError> {
        let customs = sqlx::query_as::<_, CustomRecord>(
            "SELECT * FROM customs WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(customs)
    }

    /// Deletes a user by id; alerts and customs cascade. Returns true if a
    /// row was deleted. No chat command reaches this; it backs the
    /// referential-integrity requirement.
    pub async fn delete_user(&self, user_id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
