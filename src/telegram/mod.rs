//! Telegram transport layer: adapters, outbound Bot implementation, and the
//! polling and webhook runners.

mod adapters;
mod bot_adapter;
mod polling;
mod webhook;

pub use adapters::{
    update_to_core, TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper,
};
pub use bot_adapter::TelegramBotAdapter;
pub use polling::run_polling;
pub use webhook::{app as webhook_app, run_webhook, WebhookState};
