//! Core types: user, chat, incoming message, update, and keyboard button.
//!
//! Types are split into one file per main type for easier navigation.

mod chat;
mod message;
mod update;
mod user;

pub use chat::Chat;
pub use message::IncomingMessage;
pub use update::{CallbackAction, Update};
pub use user::User;

/// One inline-keyboard button: visible label plus the callback payload
/// delivered back when it is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub label: String,
    pub data: String,
}
