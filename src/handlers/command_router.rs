//! Command router: executes parsed commands against the store, the chart
//! delegate, and the outbound bot.
//!
//! Every successful branch sends exactly one reply. Chart failures are
//! caught and surfaced as text; nothing here may take the process down.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::chart::{
    validate_custom, ChartDelegate, ChartFigure, ChartMode, ChartOverrides, ChartRequest,
};
use crate::commands::{self, AlertArgs, BotCommand, ChartArgs, ParseOutcome};
use crate::core::{Bot, CallbackAction, Chat, IncomingMessage, KeyboardButton, Result, Update, User};
use crate::storage::BotRepository;

const HELP_TEXT: &str = "\
📚 <b>MA Strategy Bot Commands</b>\n\n\
1️⃣ /chart <code>&lt;symbol&gt; &lt;tf&gt; [ma_type] [ma_fast] [ma_slow]</code>\n\
2️⃣ /hist_chart <code>&lt;symbol&gt; &lt;tf&gt; [ma_type] [ma_fast] [ma_slow]</code>\n\
3️⃣ /set_alert <code>&lt;symbol&gt; &lt;tf&gt; &lt;short_ma&gt; &lt;long_ma&gt; [ma_type]</code>\n\
4️⃣ /get_alerts\n\
5️⃣ /setcustom <code>&lt;key&gt; &lt;value&gt;</code>\n\
6️⃣ /listcustoms\n\n\
Use commands carefully. All symbols uppercase.";

const DELETE_ALERT_PREFIX: &str = "delete_alert:";

/// Routes one update to its handler. Explicitly constructed and injected
/// into the transports; holds no global state.
pub struct CommandRouter {
    bot: Arc<dyn Bot>,
    repo: BotRepository,
    chart: Arc<dyn ChartDelegate>,
}

impl CommandRouter {
    pub fn new(bot: Arc<dyn Bot>, repo: BotRepository, chart: Arc<dyn ChartDelegate>) -> Self {
        Self { bot, repo, chart }
    }

    /// Dispatches a core update to exactly one handler.
    #[instrument(skip(self, update))]
    pub async fn handle_update(&self, update: &Update) -> Result<()> {
        match update {
            Update::Message(message) => self.handle_message(message).await,
            Update::Callback(action) => self.handle_callback(action).await,
        }
    }

    async fn handle_message(&self, message: &IncomingMessage) -> Result<()> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            text = %message.text,
            "Received message"
        );

        match commands::parse(&message.text) {
            ParseOutcome::Command(command) => {
                self.run_command(&message.user, &message.chat, command).await
            }
            ParseOutcome::Usage(usage) => self.bot.send_text(&message.chat, usage).await,
            ParseOutcome::Rejected(reason) => self.bot.send_text(&message.chat, &reason).await,
            ParseOutcome::Echo(text) => {
                self.bot
                    .send_text(&message.chat, &format!("You said: {}", text))
                    .await
            }
        }
    }

    async fn run_command(&self, user: &User, chat: &Chat, command: BotCommand) -> Result<()> {
        match command {
            BotCommand::Start => self.start(user, chat).await,
            BotCommand::Help => self.bot.send_text(chat, HELP_TEXT).await,
            BotCommand::Chart(args) => self.render_chart(user, chat, args, ChartMode::Live).await,
            BotCommand::HistChart(args) => {
                self.render_chart(user, chat, args, ChartMode::Backtest).await
            }
            BotCommand::SetAlert(args) => self.set_alert(user, chat, args).await,
            BotCommand::GetAlerts => self.get_alerts(user, chat).await,
            BotCommand::SetCustom { key, value } => self.set_custom(user, chat, key, value).await,
            BotCommand::ListCustoms => self.list_customs(user, chat).await,
        }
    }

    async fn start(&self, user: &User, chat: &Chat) -> Result<()> {
        let (_, created) = self
            .repo
            .get_or_create_user(user.id, user.username.as_deref())
            .await?;

        let text = if created {
            format!(
                "👋 Welcome, {}! You are now registered.",
                user.display_name()
            )
        } else {
            format!("Welcome back, {}!", user.display_name())
        };
        self.bot.send_text(chat, &text).await
    }

    async fn render_chart(
        &self,
        user: &User,
        chat: &Chat,
        args: ChartArgs,
        mode: ChartMode,
    ) -> Result<()> {
        let (record, _) = self
            .repo
            .get_or_create_user(user.id, user.username.as_deref())
            .await?;
        let customs = self.repo.customs_for_user(record.id).await?;
        let overrides = ChartOverrides::from_customs(&customs);

        let request = ChartRequest {
            symbol: args.symbol,
            timeframe: args.timeframe,
            ma_type: args.ma_type,
            ma_fast: args.ma_fast,
            ma_slow: args.ma_slow,
            mode,
        };

        let figure = match self.chart.render(&request, &overrides).await {
            Ok(figure) => figure,
            Err(e) => {
                warn!(user_id = user.id, error = %e, "Chart generation failed");
                let text = match mode {
                    ChartMode::Live => format!("❌ Error generating chart: {}", e),
                    ChartMode::Backtest => format!("❌ Error generating historical chart: {}", e),
                };
                return self.bot.send_text(chat, &text).await;
            }
        };

        match figure {
            Some(ChartFigure::Png(png)) => {
                let caption = format!("<b>{}</b>", request.summary());
                self.bot.send_photo(chat, png, &caption).await
            }
            Some(ChartFigure::Pdf(pdf)) => {
                let file_name = format!("{}_{}.pdf", request.symbol, request.timeframe);
                let caption = format!("{} | {}", request.symbol, request.timeframe);
                self.bot.send_document(chat, pdf, &file_name, &caption).await
            }
            // Delegate produced nothing to show; stay silent.
            None => Ok(()),
        }
    }

    async fn set_alert(&self, user: &User, chat: &Chat, args: AlertArgs) -> Result<()> {
        let (record, _) = self
            .repo
            .get_or_create_user(user.id, user.username.as_deref())
            .await?;

        let (alert, created) = self
            .repo
            .get_or_create_alert(
                record.id,
                &args.symbol,
                &args.timeframe,
                i64::from(args.ma_fast),
                i64::from(args.ma_slow),
                &args.ma_type,
            )
            .await?;

        let text = if created {
            format!("✅ Alert set: {}", alert.summary())
        } else {
            "⚠️ You already have this alert.".to_string()
        };
        self.bot.send_text(chat, &text).await
    }

    async fn get_alerts(&self, user: &User, chat: &Chat) -> Result<()> {
        let (record, _) = self
            .repo
            .get_or_create_user(user.id, user.username.as_deref())
            .await?;
        let alerts = self.repo.alerts_for_user(record.id).await?;

        if alerts.is_empty() {
            return self.bot.send_text(chat, "⚠️ No active alerts.").await;
        }

        let buttons: Vec<KeyboardButton> = alerts
            .iter()
            .map(|alert| KeyboardButton {
                label: format!("❌ {}", alert.summary()),
                data: format!("{}{}", DELETE_ALERT_PREFIX, alert.id),
            })
            .collect();

        self.bot
            .send_keyboard(chat, "📊 Your Active Alerts:", &buttons)
            .await
    }

    async fn set_custom(&self, user: &User, chat: &Chat, key: String, value: String) -> Result<()> {
        let (record, _) = self
            .repo
            .get_or_create_user(user.id, user.username.as_deref())
            .await?;

        match validate_custom(&key, &value) {
            Ok(parsed) => {
                let canonical = parsed.to_string();
                self.repo.upsert_custom(record.id, &key, &canonical).await?;
                self.bot
                    .send_text(chat, &format!("✅ Custom saved: {} = {}", key, canonical))
                    .await
            }
            Err(reason) => self.bot.send_text(chat, &format!("❌ {}", reason)).await,
        }
    }

    async fn list_customs(&self, user: &User, chat: &Chat) -> Result<()> {
        let (record, _) = self
            .repo
            .get_or_create_user(user.id, user.username.as_deref())
            .await?;
        let customs = self.repo.customs_for_user(record.id).await?;

        if customs.is_empty() {
            return self.bot.send_text(chat, "No custom settings.").await;
        }

        let lines: Vec<String> = customs
            .iter()
            .map(|c| format!("• <b>{}</b>: {}", c.key, c.value))
            .collect();
        self.bot.send_text(chat, &lines.join("\n")).await
    }

    async fn handle_callback(&self, action: &CallbackAction) -> Result<()> {
        info!(
            user_id = action.user.id,
            data = %action.data,
            "Received callback"
        );

        let Some(id_str) = action.data.strip_prefix(DELETE_ALERT_PREFIX) else {
            // Unknown payload; acknowledge so the client stops its spinner.
            return self.bot.answer_callback(&action.callback_id, "").await;
        };

        let deleted = match id_str.parse::<i64>() {
            Ok(alert_id) => self.repo.delete_alert(alert_id).await?,
            Err(_) => false,
        };

        if deleted {
            self.bot
                .answer_callback(&action.callback_id, "✅ Alert deleted")
                .await?;
            if let (Some(chat), Some(message_id)) = (&action.chat, action.message_id) {
                self.bot
                    .edit_text(chat, message_id, "✅ Alert deleted.")
                    .await?;
            }
            Ok(())
        } else {
            self.bot
                .answer_callback(&action.callback_id, "⚠️ Alert not found")
                .await
        }
    }
}
