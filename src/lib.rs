//! # MA crossover Telegram bot
//!
//! Front-end for a moving-average crossover charting/alerting tool: parses
//! chat commands, reads/writes users, alerts and custom settings, and
//! delegates chart generation to an external renderer. Updates arrive via
//! long-polling or an inbound webhook and are processed by a bounded
//! worker pool.

pub mod chart;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod handlers;
pub mod service;
pub mod storage;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    init_tracing, Bot, BotError, CallbackAction, Chat, IncomingMessage, KeyboardButton, Result,
    Update, User,
};

pub use chart::{
    ChartDelegate, ChartError, ChartFigure, ChartMode, ChartOverrides, ChartRequest,
    HttpChartDelegate,
};
pub use commands::{BotCommand, ParseOutcome};
pub use config::{BotConfig, TransportMode};
pub use dispatch::{DispatchError, UpdateDispatcher};
pub use handlers::CommandRouter;
pub use service::{run_bot, BotService};
pub use storage::{AlertRecord, BotRepository, CustomRecord, StorageError, UserRecord};
pub use telegram::{
    run_polling, run_webhook, webhook_app, TelegramBotAdapter, WebhookState,
};
