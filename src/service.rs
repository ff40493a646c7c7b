//! BotService: explicitly constructed service object wiring config, store,
//! chart delegate, router, and dispatcher. Injected into the transports;
//! there is no module-level bot instance.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, instrument};

use crate::chart::{ChartDelegate, HttpChartDelegate};
use crate::config::{BotConfig, TransportMode};
use crate::core::{init_tracing, Bot};
use crate::dispatch::UpdateDispatcher;
use crate::handlers::CommandRouter;
use crate::storage::BotRepository;
use crate::telegram::{run_polling, run_webhook, TelegramBotAdapter};

/// The assembled bot: owns the router and the transport handle. Built from
/// config; tests build it with substituted components.
pub struct BotService {
    config: BotConfig,
    bot: teloxide::Bot,
    router: Arc<CommandRouter>,
}

impl BotService {
    /// Creates a service with production components (teloxide transport,
    /// SQLite store, HTTP chart delegate).
    pub async fn new(config: BotConfig) -> Result<Self> {
        let repo = BotRepository::new(&config.database_url).await?;
        let bot = teloxide::Bot::new(config.bot_token.clone());
        let outbound: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
        let chart: Arc<dyn ChartDelegate> =
            Arc::new(HttpChartDelegate::new(config.chart_service_url.clone()));

        Ok(Self::with_components(config, bot, outbound, repo, chart))
    }

    /// Assembles the service from pre-built components (used by tests to
    /// substitute the outbound bot and chart delegate).
    pub fn with_components(
        config: BotConfig,
        bot: teloxide::Bot,
        outbound: Arc<dyn Bot>,
        repo: BotRepository,
        chart: Arc<dyn ChartDelegate>,
    ) -> Self {
        let router = Arc::new(CommandRouter::new(outbound, repo, chart));
        Self {
            config,
            bot,
            router,
        }
    }

    /// The router, e.g. for driving updates directly in tests.
    pub fn router(&self) -> Arc<CommandRouter> {
        Arc::clone(&self.router)
    }

    /// Starts the worker pool and runs the configured transport until
    /// interrupted.
    pub async fn run(self) -> Result<()> {
        let dispatcher = Arc::new(UpdateDispatcher::start(
            Arc::clone(&self.router),
            self.config.dispatch_workers,
            self.config.dispatch_queue,
        ));

        match self.config.transport {
            TransportMode::Polling => run_polling(self.bot, dispatcher).await,
            TransportMode::Webhook => {
                let webhook_url = self
                    .config
                    .webhook_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("WEBHOOK_URL must be set in webhook mode"))?;
                run_webhook(
                    self.bot,
                    dispatcher,
                    webhook_url,
                    &self.config.webhook_bind,
                )
                .await
            }
        }
    }
}

/// Main entry: validate config, init logging, build the service, run the
/// configured transport.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    if let Some(parent) = Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        transport = ?config.transport,
        "Initializing bot"
    );

    let service = BotService::new(config).await?;
    service.run().await
}
