//! User row model for persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row from the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    /// Primary key.
    pub id: i64,
    /// Telegram user id (unique).
    pub uid: i64,
    /// Telegram username at first contact.
    pub username: Option<String>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
