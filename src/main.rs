//! Binary for the MA crossover Telegram bot.

use anyhow::Result;
use clap::Parser;
use macross_bot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            token,
            polling,
            webhook,
        } => {
            let config = load_config(token, polling, webhook)?;
            run_bot(config).await
        }
    }
}
