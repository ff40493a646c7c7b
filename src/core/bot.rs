//! Outbound bot trait: everything the router needs to talk back to Telegram.
//!
//! Production code uses the teloxide adapter; tests substitute a recording
//! implementation.

use async_trait::async_trait;

use super::error::Result;
use super::types::{Chat, KeyboardButton};

/// Outbound send primitives against the remote bot service.
///
/// Captions and texts may contain HTML; implementations send with HTML
/// parse mode.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the chat.
    async fn send_text(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a PNG image with a caption.
    async fn send_photo(&self, chat: &Chat, png: Vec<u8>, caption: &str) -> Result<()>;

    /// Sends a document attachment (e.g. a PDF report) with a caption.
    async fn send_document(
        &self,
        chat: &Chat,
        data: Vec<u8>,
        file_name: &str,
        caption: &str,
    ) -> Result<()>;

    /// Sends a text message with one inline-keyboard button per row.
    async fn send_keyboard(&self, chat: &Chat, text: &str, buttons: &[KeyboardButton])
        -> Result<()>;

    /// Edits the text of a previously sent message.
    async fn edit_text(&self, chat: &Chat, message_id: i32, text: &str) -> Result<()>;

    /// Answers a callback query with a short notice (toast).
    async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<()>;
}
