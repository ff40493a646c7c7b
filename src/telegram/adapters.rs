//! Converters from teloxide types to the core update shapes.

use crate::core::{CallbackAction, Chat, IncomingMessage, Update, User};

/// Telegram user to core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> TelegramUserWrapper<'a> {
    pub fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Telegram message to core incoming message. Non-text messages and
/// messages without a sender yield `None` and are ignored upstream.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    pub fn to_core(&self) -> Option<IncomingMessage> {
        let text = self.0.text()?;
        let user = self.0.from.as_ref()?;

        Some(IncomingMessage {
            id: self.0.id.to_string(),
            user: TelegramUserWrapper(user).to_core(),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            text: text.to_string(),
            created_at: chrono::Utc::now(),
        })
    }
}

/// Telegram callback query to core callback action. Queries without a
/// payload yield `None`.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> TelegramCallbackWrapper<'a> {
    pub fn to_core(&self) -> Option<CallbackAction> {
        let data = self.0.data.clone()?;

        let (chat, message_id) = match self.0.message.as_ref() {
            Some(message) => (
                Some(Chat {
                    id: message.chat().id.0,
                    chat_type: format!("{:?}", message.chat().kind),
                }),
                Some(message.id().0),
            ),
            None => (None, None),
        };

        Some(CallbackAction {
            callback_id: self.0.id.to_string(),
            user: TelegramUserWrapper(&self.0.from).to_core(),
            chat,
            message_id,
            data,
        })
    }
}

/// Converts a full teloxide update (e.g. from a webhook body) into the
/// core shape. Update kinds the router does not handle yield `None`.
pub fn update_to_core(update: &teloxide::types::Update) -> Option<Update> {
    use teloxide::types::UpdateKind;

    match &update.kind {
        UpdateKind::Message(message) => TelegramMessageWrapper(message)
            .to_core()
            .map(Update::Message),
        UpdateKind::CallbackQuery(query) => TelegramCallbackWrapper(query)
            .to_core()
            .map(Update::Callback),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: a callback query converts with its id carried as a plain
    /// string and the payload intact.**
    #[test]
    fn test_callback_query_to_core() {
        let query: teloxide::types::CallbackQuery = serde_json::from_value(serde_json::json!({
            "id": "cb-42",
            "from": { "id": 7, "is_bot": false, "first_name": "Test", "username": "testuser" },
            "chat_instance": "ci-1",
            "data": "delete_alert:7"
        }))
        .unwrap();

        let action = TelegramCallbackWrapper(&query).to_core().unwrap();
        assert_eq!(action.callback_id, "cb-42");
        assert_eq!(action.data, "delete_alert:7");
        assert_eq!(action.user.id, 7);
        assert!(action.chat.is_none());
        assert!(action.message_id.is_none());
    }

    /// **Test: a callback query without a payload yields nothing.**
    #[test]
    fn test_callback_query_without_data_is_dropped() {
        let query: teloxide::types::CallbackQuery = serde_json::from_value(serde_json::json!({
            "id": "cb-43",
            "from": { "id": 7, "is_bot": false, "first_name": "Test" },
            "chat_instance": "ci-1"
        }))
        .unwrap();

        assert!(TelegramCallbackWrapper(&query).to_core().is_none());
    }
}
