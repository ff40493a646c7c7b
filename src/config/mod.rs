//! Bot config: Telegram token, database, logging, transport mode, chart
//! service. Loaded from env; call [`BotConfig::validate`] after load to
//! fail fast before init.

use anyhow::Result;
use std::env;

/// How updates reach the bot: pull in a loop, or receive pushes on a
/// registered URL. Mutually exclusive, chosen at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Polling,
    Webhook,
}

impl TransportMode {
    fn from_env_value(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "polling" => Ok(TransportMode::Polling),
            "webhook" => Ok(TransportMode::Webhook),
            other => anyhow::bail!(
                "TRANSPORT_MODE must be 'polling' or 'webhook', got '{}'",
                other
            ),
        }
    }
}

/// Full bot config. Use [`BotConfig::load`] for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// DATABASE_URL (SQLite)
    pub database_url: String,
    /// LOG_FILE path
    pub log_file: String,
    /// TRANSPORT_MODE: polling (default) or webhook
    pub transport: TransportMode,
    /// WEBHOOK_URL: externally reachable URL, required in webhook mode
    pub webhook_url: Option<String>,
    /// WEBHOOK_BIND: local listen address for the webhook server
    pub webhook_bind: String,
    /// CHART_SERVICE_URL: base URL of the MaCross renderer
    pub chart_service_url: String,
    /// DISPATCH_WORKERS: size of the handler worker pool
    pub dispatch_workers: usize,
    /// DISPATCH_QUEUE: capacity of the update queue
    pub dispatch_queue: usize,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:macross_bot.db".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/macross-bot.log".to_string());
        let transport = match env::var("TRANSPORT_MODE") {
            Ok(value) => TransportMode::from_env_value(&value)?,
            Err(_) => TransportMode::Polling,
        };
        let webhook_url = env::var("WEBHOOK_URL").ok();
        let webhook_bind =
            env::var("WEBHOOK_BIND").unwrap_or_else(|_| "0.0.0.0:8443".to_string());
        let chart_service_url = env::var("CHART_SERVICE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8090".to_string());
        let dispatch_workers = env::var("DISPATCH_WORKERS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4);
        let dispatch_queue = env::var("DISPATCH_QUEUE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(64);

        Ok(Self {
            bot_token,
            database_url,
            log_file,
            transport,
            webhook_url,
            webhook_bind,
            chart_service_url,
            dispatch_workers,
            dispatch_queue,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.chart_service_url).is_err() {
            anyhow::bail!(
                "CHART_SERVICE_URL is not a valid URL: {}",
                self.chart_service_url
            );
        }
        if self.transport == TransportMode::Webhook {
            match &self.webhook_url {
                Some(url) if reqwest::Url::parse(url).is_ok() => {}
                Some(url) => anyhow::bail!("WEBHOOK_URL is not a valid URL: {}", url),
                None => anyhow::bail!("WEBHOOK_URL must be set in webhook mode"),
            }
        }
        if self.dispatch_workers == 0 {
            anyhow::bail!("DISPATCH_WORKERS must be at least 1");
        }
        if self.dispatch_queue == 0 {
            anyhow::bail!("DISPATCH_QUEUE must be at least 1");
        }
        Ok(())
    }
}
