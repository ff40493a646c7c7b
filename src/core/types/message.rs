//! Incoming text message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A single incoming text message with its sender and chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
