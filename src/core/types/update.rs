//! Transport-agnostic update shape fed into the dispatcher.

use serde::{Deserialize, Serialize};

use super::{chat::Chat, message::IncomingMessage, user::User};

/// A pressed inline-keyboard button.
///
/// `callback_id` answers the acknowledgment channel; `chat`/`message_id`
/// locate the message carrying the keyboard so it can be edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackAction {
    pub callback_id: String,
    pub user: User,
    pub chat: Option<Chat>,
    pub message_id: Option<i32>,
    pub data: String,
}

/// One unit of work for the router: a text message or a button press.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Update {
    Message(IncomingMessage),
    Callback(CallbackAction),
}
