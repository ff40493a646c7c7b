//! User identity type for core updates.

use serde::{Deserialize, Serialize};

/// User identity (Telegram uid and optional names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Display name used in replies: username if set, otherwise "friend".
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("friend")
    }
}
