//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code
//! sends through Telegram; tests substitute a recording implementation.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId,
    ParseMode,
};

use crate::core::{Bot as CoreBot, BotError, Chat, KeyboardButton, Result};

/// Thin wrapper around teloxide::Bot that implements the core Bot trait.
/// All texts and captions are sent with HTML parse mode.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_text(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_photo(&self, chat: &Chat, png: Vec<u8>, caption: &str) -> Result<()> {
        self.bot
            .send_photo(ChatId(chat.id), InputFile::memory(png))
            .caption(caption.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_document(
        &self,
        chat: &Chat,
        data: Vec<u8>,
        file_name: &str,
        caption: &str,
    ) -> Result<()> {
        let document = InputFile::memory(data).file_name(file_name.to_string());
        self.bot
            .send_document(ChatId(chat.id), document)
            .caption(caption.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        buttons: &[KeyboardButton],
    ) -> Result<()> {
        let rows: Vec<Vec<InlineKeyboardButton>> = buttons
            .iter()
            .map(|b| vec![InlineKeyboardButton::callback(b.label.clone(), b.data.clone())])
            .collect();

        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .parse_mode(ParseMode::Html)
            .reply_markup(InlineKeyboardMarkup::new(rows))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn edit_text(&self, chat: &Chat, message_id: i32, text: &str) -> Result<()> {
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(message_id), text.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<()> {
        let mut request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()));
        if !text.is_empty() {
            request = request.text(text.to_string());
        }
        request
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }
}
