//! Custom-setting row model for persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row from the `customs` table: a per-user chart override such as
/// figsize, sl or tp. The value is stored as canonical JSON text.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomRecord {
    /// Primary key.
    pub id: i64,
    /// Owning user (`users.id`).
    pub user_id: i64,
    /// Override key; unique per user.
    pub key: String,
    /// Override value as JSON text.
    pub value: String,
    /// When the row was first created.
    pub created_at: DateTime<Utc>,
}
