//! Polling runner: a teloxide dispatcher that converts updates to the core
//! shape and feeds them into the bounded dispatch queue.

use std::sync::Arc;

use anyhow::Result;
use teloxide::dptree;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;
use tracing::{error, info, warn};

use crate::core::Update as CoreUpdate;
use crate::dispatch::UpdateDispatcher;

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Runs the bot in polling mode. Pending updates queued before start are
/// dropped. Blocks until interrupted (Ctrl-C), then returns cleanly.
pub async fn run_polling(bot: teloxide::Bot, dispatcher: Arc<UpdateDispatcher>) -> Result<()> {
    // A webhook registration left over from a previous run starves polling.
    if let Err(e) = bot.delete_webhook().await {
        warn!(error = %e, "Failed to remove existing webhook before polling");
    }

    info!("🤖 Bot running in POLLING mode...");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    let listener = Polling::builder(bot.clone())
        .drop_pending_updates()
        .build();

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("Error from the update listener"),
        )
        .await;

    info!("🛑 Bot stopped manually.");
    Ok(())
}

async fn on_message(
    message: Message,
    dispatcher: Arc<UpdateDispatcher>,
) -> ResponseResult<()> {
    if let Some(core) = TelegramMessageWrapper(&message).to_core() {
        if let Err(e) = dispatcher.dispatch(CoreUpdate::Message(core)).await {
            error!(error = %e, "Failed to enqueue message update");
        }
    }
    Ok(())
}

async fn on_callback(
    query: CallbackQuery,
    dispatcher: Arc<UpdateDispatcher>,
) -> ResponseResult<()> {
    if let Some(core) = TelegramCallbackWrapper(&query).to_core() {
        if let Err(e) = dispatcher.dispatch(CoreUpdate::Callback(core)).await {
            error!(error = %e, "Failed to enqueue callback update");
        }
    }
    Ok(())
}
