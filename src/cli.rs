//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{BotConfig, TransportMode};

#[derive(Parser)]
#[command(name = "macross-bot")]
#[command(about = "MA crossover charting/alerting Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; flags override BOT_TOKEN and TRANSPORT_MODE).
    Run {
        #[arg(short, long)]
        token: Option<String>,

        /// Force polling mode.
        #[arg(long, conflicts_with = "webhook")]
        polling: bool,

        /// Force webhook mode (requires WEBHOOK_URL).
        #[arg(long)]
        webhook: bool,
    },
}

/// Load BotConfig from environment; CLI flags override token and transport.
pub fn load_config(token: Option<String>, polling: bool, webhook: bool) -> Result<BotConfig> {
    let mut config = BotConfig::load(token)?;
    if polling {
        config.transport = TransportMode::Polling;
    }
    if webhook {
        config.transport = TransportMode::Webhook;
    }
    Ok(config)
}
