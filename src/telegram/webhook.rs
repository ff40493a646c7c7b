//! Webhook runner: registers the callback URL with Telegram and serves the
//! inbound endpoint with axum.
//!
//! `POST /bot-webhook` carries one update payload; it is enqueued and the
//! request acknowledged immediately. Malformed bodies are logged and
//! acknowledged with an error indicator so Telegram does not retry forever.
//! `GET /bot-webhook` returns a liveness string.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::dispatch::UpdateDispatcher;

use super::adapters::update_to_core;

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct WebhookState {
    pub dispatcher: Arc<UpdateDispatcher>,
}

/// Builds the webhook router (separately constructible for tests).
pub fn app(state: WebhookState) -> Router {
    Router::new()
        .route("/bot-webhook", get(liveness).post(receive_update))
        .with_state(state)
}

async fn liveness() -> &'static str {
    "MA crossover bot is running"
}

async fn receive_update(State(state): State<WebhookState>, body: String) -> Json<Value> {
    let update: teloxide::types::Update = match serde_json::from_str(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "Malformed webhook body");
            return Json(json!({ "ok": false, "error": e.to_string() }));
        }
    };

    match update_to_core(&update) {
        Some(core) => match state.dispatcher.try_dispatch(core) {
            Ok(()) => Json(json!({ "ok": true })),
            Err(e) => {
                error!(error = %e, "Failed to enqueue webhook update");
                Json(json!({ "ok": false, "error": e.to_string() }))
            }
        },
        // Update kinds the router does not handle are acknowledged as-is.
        None => Json(json!({ "ok": true })),
    }
}

/// Runs the bot in webhook mode: registers the URL once (failure is fatal)
/// and serves until interrupted.
pub async fn run_webhook(
    bot: teloxide::Bot,
    dispatcher: Arc<UpdateDispatcher>,
    webhook_url: &str,
    bind_addr: &str,
) -> Result<()> {
    use teloxide::prelude::*;

    let url = reqwest::Url::parse(webhook_url).context("invalid webhook URL")?;
    bot.set_webhook(url)
        .await
        .context("webhook registration with Telegram failed")?;

    info!(url = %webhook_url, "🤖 Bot running in WEBHOOK mode...");

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind webhook server on {}", bind_addr))?;
    info!(addr = %bind_addr, "Webhook server listening");

    axum::serve(listener, app(WebhookState { dispatcher }))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("🛑 Bot stopped manually.");
        })
        .await?;

    Ok(())
}
