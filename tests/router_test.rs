//! Integration tests for [`macross_bot::CommandRouter`]: full command flows
//! against an in-memory store, a recording bot, and a stub chart delegate.

mod support;

use std::sync::Arc;

use macross_bot::{
    BotRepository, CallbackAction, Chat, CommandRouter, IncomingMessage, Update, User,
};
use support::{ChartBehavior, Outbound, RecordingBot, StubChart};

struct Harness {
    router: CommandRouter,
    bot: Arc<RecordingBot>,
    chart: Arc<StubChart>,
    repo: BotRepository,
}

async fn harness(behavior: ChartBehavior) -> Harness {
    let repo = BotRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");
    let bot = Arc::new(RecordingBot::new());
    let chart = Arc::new(StubChart::new(behavior));
    let router = CommandRouter::new(bot.clone(), repo.clone(), chart.clone());
    Harness {
        router,
        bot,
        chart,
        repo,
    }
}

fn message(uid: i64, text: &str) -> Update {
    Update::Message(IncomingMessage {
        id: "1".to_string(),
        user: User {
            id: uid,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 500,
            chat_type: "private".to_string(),
        },
        text: text.to_string(),
        created_at: chrono::Utc::now(),
    })
}

fn callback(uid: i64, data: &str) -> Update {
    Update::Callback(CallbackAction {
        callback_id: "cb-1".to_string(),
        user: User {
            id: uid,
            username: Some("testuser".to_string()),
            first_name: None,
            last_name: None,
        },
        chat: Some(Chat {
            id: 500,
            chat_type: "private".to_string(),
        }),
        message_id: Some(77),
        data: data.to_string(),
    })
}

fn texts(bot: &RecordingBot) -> Vec<String> {
    bot.sent()
        .into_iter()
        .filter_map(|o| match o {
            Outbound::Text { text, .. } => Some(text),
            _ => None,
        })
        .collect()
}

/// **Test: /start registers once; the reply differs between first and
/// later calls, and no duplicate user rows appear.**
#[tokio::test]
async fn test_start_first_and_repeat() {
    let h = harness(ChartBehavior::Png).await;

    h.router.handle_update(&message(42, "/start")).await.unwrap();
    h.router.handle_update(&message(42, "/start")).await.unwrap();

    let texts = texts(&h.bot);
    assert_eq!(texts.len(), 2);
    assert!(texts[0].contains("Welcome, testuser"));
    assert!(texts[0].contains("registered"));
    assert!(texts[1].contains("Welcome back, testuser"));
    assert_ne!(texts[0], texts[1]);

    let (user, created) = h.repo.get_or_create_user(42, None).await.unwrap();
    assert!(!created);
    assert_eq!(user.uid, 42);
}

/// **Test: /help replies with the command list.**
#[tokio::test]
async fn test_help() {
    let h = harness(ChartBehavior::Png).await;
    h.router.handle_update(&message(42, "/help")).await.unwrap();

    let texts = texts(&h.bot);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("/chart"));
    assert!(texts[0].contains("/set_alert"));
    assert!(texts[0].contains("/listcustoms"));
}

/// **Test: /chart with fewer than 2 args never touches the delegate or the
/// store; the reply is the usage line.**
#[tokio::test]
async fn test_chart_under_arity_is_a_no_op() {
    let h = harness(ChartBehavior::Png).await;

    h.router.handle_update(&message(42, "/chart")).await.unwrap();
    h.router
        .handle_update(&message(42, "/chart BTCUSDT"))
        .await
        .unwrap();

    assert!(h.chart.calls().is_empty());

    let texts = texts(&h.bot);
    assert_eq!(texts.len(), 2);
    assert!(texts[0].starts_with("Usage: /chart"));

    // No user row was created on the way.
    let (_, created) = h.repo.get_or_create_user(42, None).await.unwrap();
    assert!(created);
}

/// **Test: /chart renders in live mode and replies with a photo whose
/// caption carries the resolved parameters.**
#[tokio::test]
async fn test_chart_sends_photo() {
    let h = harness(ChartBehavior::Png).await;

    h.router
        .handle_update(&message(42, "/chart btcusdt 1H ema 9 21"))
        .await
        .unwrap();

    let calls = h.chart.calls();
    assert_eq!(calls.len(), 1);
    let (request, _) = &calls[0];
    assert_eq!(request.symbol, "BTCUSDT");
    assert_eq!(request.timeframe, "1h");
    assert_eq!(request.ma_fast, 9);
    assert_eq!(request.ma_slow, 21);

    let sent = h.bot.sent();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        Outbound::Photo { caption, .. } => {
            assert!(caption.contains("BTCUSDT | 1h | EMA(9,21)"));
        }
        other => panic!("expected photo, got {:?}", other),
    }
}

/// **Test: stored customs are validated and forwarded to the delegate.**
#[tokio::test]
async fn test_chart_applies_custom_overrides() {
    let h = harness(ChartBehavior::Png).await;

    h.router
        .handle_update(&message(42, "/setcustom figsize [10, 6]"))
        .await
        .unwrap();
    h.router
        .handle_update(&message(42, "/chart BTCUSDT 1h"))
        .await
        .unwrap();

    let calls = h.chart.calls();
    assert_eq!(calls.len(), 1);
    let (_, overrides) = &calls[0];
    assert_eq!(overrides.figsize, Some((10.0, 6.0)));
}

/// **Test: /hist_chart renders in backtest mode and replies with a PDF
/// document named after symbol and timeframe.**
#[tokio::test]
async fn test_hist_chart_sends_document() {
    let h = harness(ChartBehavior::Pdf).await;

    h.router
        .handle_update(&message(42, "/hist_chart BTCUSDT 1h"))
        .await
        .unwrap();

    let sent = h.bot.sent();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        Outbound::Document {
            file_name, caption, ..
        } => {
            assert_eq!(file_name, "BTCUSDT_1h.pdf");
            assert_eq!(caption, "BTCUSDT | 1h");
        }
        other => panic!("expected document, got {:?}", other),
    }
}

/// **Test: delegate failure is caught and surfaced as a text reply with
/// the original message; the handler does not error.**
#[tokio::test]
async fn test_chart_failure_is_surfaced_as_text() {
    let h = harness(ChartBehavior::Fail("exchange unavailable".to_string())).await;

    h.router
        .handle_update(&message(42, "/chart BTCUSDT 1h"))
        .await
        .unwrap();

    let texts = texts(&h.bot);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("❌ Error generating chart:"));
    assert!(texts[0].contains("exchange unavailable"));
}

/// **Test: a delegate that returns no figure sends nothing.**
#[tokio::test]
async fn test_chart_no_figure_is_silent() {
    let h = harness(ChartBehavior::NoFigure).await;

    h.router
        .handle_update(&message(42, "/chart BTCUSDT 1h"))
        .await
        .unwrap();

    assert_eq!(h.chart.calls().len(), 1);
    assert!(h.bot.sent().is_empty());
}

/// **Test: a second /set_alert with the identical tuple reports the
/// duplicate and inserts nothing.**
#[tokio::test]
async fn test_set_alert_duplicate() {
    let h = harness(ChartBehavior::Png).await;

    h.router
        .handle_update(&message(42, "/set_alert BTCUSDT 1h 9 21"))
        .await
        .unwrap();
    h.router
        .handle_update(&message(42, "/set_alert BTCUSDT 1h 9 21"))
        .await
        .unwrap();

    let texts = texts(&h.bot);
    assert!(texts[0].contains("✅ Alert set: BTCUSDT | 1h | SMA(9,21)"));
    assert!(texts[1].contains("already have this alert"));

    let (user, _) = h.repo.get_or_create_user(42, None).await.unwrap();
    assert_eq!(h.repo.alerts_for_user(user.id).await.unwrap().len(), 1);
}

/// **Test: non-numeric MA windows are rejected with a user-facing message
/// and no alert is stored.**
#[tokio::test]
async fn test_set_alert_rejects_non_numeric() {
    let h = harness(ChartBehavior::Png).await;

    h.router
        .handle_update(&message(42, "/set_alert BTCUSDT 1h nine 21"))
        .await
        .unwrap();

    let texts = texts(&h.bot);
    assert_eq!(texts, vec!["short_ma and long_ma must be numbers.".to_string()]);
}

/// **Test: set → list → delete → list alert scenario.**
///
/// `/set_alert BTCUSDT 1h 9 21`, `/get_alerts` lists one button carrying
/// the alert; its delete action answers and edits; `/get_alerts` then
/// reports no active alerts.
#[tokio::test]
async fn test_alert_lifecycle_scenario() {
    let h = harness(ChartBehavior::Png).await;

    h.router
        .handle_update(&message(42, "/set_alert BTCUSDT 1h 9 21"))
        .await
        .unwrap();
    h.router
        .handle_update(&message(42, "/get_alerts"))
        .await
        .unwrap();

    let sent = h.bot.sent();
    let Outbound::Keyboard { text, buttons, .. } = &sent[1] else {
        panic!("expected keyboard, got {:?}", sent[1]);
    };
    assert!(text.contains("Your Active Alerts"));
    assert_eq!(buttons.len(), 1);
    let (label, data) = &buttons[0];
    for needle in ["BTCUSDT", "1h", "9", "21"] {
        assert!(label.contains(needle), "label missing {}: {}", needle, label);
    }
    assert!(data.starts_with("delete_alert:"));

    h.router.handle_update(&callback(42, data)).await.unwrap();

    let sent = h.bot.sent();
    assert!(matches!(
        &sent[2],
        Outbound::CallbackAnswer { text, .. } if text == "✅ Alert deleted"
    ));
    assert!(matches!(
        &sent[3],
        Outbound::Edit { message_id: 77, text, .. } if text == "✅ Alert deleted."
    ));

    h.router
        .handle_update(&message(42, "/get_alerts"))
        .await
        .unwrap();
    let sent = h.bot.sent();
    assert!(matches!(
        &sent[4],
        Outbound::Text { text, .. } if text.contains("No active alerts.")
    ));
}

/// **Test: deleting a missing alert acknowledges not-found and does not
/// error.**
#[tokio::test]
async fn test_delete_missing_alert() {
    let h = harness(ChartBehavior::Png).await;

    h.router
        .handle_update(&callback(42, "delete_alert:9999"))
        .await
        .unwrap();

    let sent = h.bot.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(
        &sent[0],
        Outbound::CallbackAnswer { text, .. } if text == "⚠️ Alert not found"
    ));
}

/// **Test: setcustom then listcustoms echoes the stored key and value.**
#[tokio::test]
async fn test_custom_scenario() {
    let h = harness(ChartBehavior::Png).await;

    h.router
        .handle_update(&message(42, "/setcustom figsize [10, 6]"))
        .await
        .unwrap();
    h.router
        .handle_update(&message(42, "/listcustoms"))
        .await
        .unwrap();

    let texts = texts(&h.bot);
    assert!(texts[0].contains("✅ Custom saved: figsize"));
    assert!(texts[1].contains("figsize"));
    assert!(texts[1].contains("[10,6]"));
}

/// **Test: an unrecognized custom key is rejected and nothing is stored.**
#[tokio::test]
async fn test_custom_unknown_key_rejected() {
    let h = harness(ChartBehavior::Png).await;

    h.router
        .handle_update(&message(42, "/setcustom colour \"red\""))
        .await
        .unwrap();
    h.router
        .handle_update(&message(42, "/listcustoms"))
        .await
        .unwrap();

    let texts = texts(&h.bot);
    assert!(texts[0].contains("Unknown custom key"));
    assert!(texts[1].contains("No custom settings."));
}

/// **Test: a repeated custom key replaces the value instead of
/// accumulating rows.**
#[tokio::test]
async fn test_custom_upsert_replaces() {
    let h = harness(ChartBehavior::Png).await;

    h.router
        .handle_update(&message(42, "/setcustom sl 0.02"))
        .await
        .unwrap();
    h.router
        .handle_update(&message(42, "/setcustom sl 0.05"))
        .await
        .unwrap();
    h.router
        .handle_update(&message(42, "/listcustoms"))
        .await
        .unwrap();

    let texts = texts(&h.bot);
    let listing = texts.last().unwrap();
    assert!(listing.contains("0.05"));
    assert!(!listing.contains("0.02"));
    assert_eq!(listing.matches("sl").count(), 1);
}

/// **Test: unmatched text falls through to the echo handler.**
#[tokio::test]
async fn test_echo_fallback() {
    let h = harness(ChartBehavior::Png).await;

    h.router
        .handle_update(&message(42, "gm everyone"))
        .await
        .unwrap();

    let texts = texts(&h.bot);
    assert_eq!(texts, vec!["You said: gm everyone".to_string()]);
}
