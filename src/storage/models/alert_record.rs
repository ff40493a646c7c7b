//! Alert row model for persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row from the `alerts` table: a user's subscription to a
/// symbol/timeframe/MA combination. Storage only; no evaluation here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AlertRecord {
    /// Primary key; also the payload of the delete button.
    pub id: i64,
    /// Owning user (`users.id`).
    pub user_id: i64,
    /// Uppercase ticker, e.g. "BTCUSDT".
    pub symbol: String,
    /// Lowercase timeframe code, e.g. "1h".
    pub timeframe: String,
    /// Fast MA window length.
    pub ma_fast: i64,
    /// Slow MA window length.
    pub ma_slow: i64,
    /// MA variant tag, e.g. "sma".
    pub ma_type: String,
    /// When the alert was created.
    pub created_at: DateTime<Utc>,
}

impl AlertRecord {
    /// Button label / summary line: `SYMBOL | tf | MATYPE(fast,slow)`.
    pub fn summary(&self) -> String {
        format!(
            "{} | {} | {}({},{})",
            self.symbol,
            self.timeframe,
            self.ma_type.to_uppercase(),
            self.ma_fast,
            self.ma_slow
        )
    }
}
