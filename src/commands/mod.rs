//! Command parsing: text → [`BotCommand`] or a usage/rejection/echo outcome.
//!
//! Pure string handling, no IO; the router executes the parsed command.

/// Default MA variant when none is given.
pub const DEFAULT_MA_TYPE: &str = "sma";
/// Default fast window for `/chart` and `/hist_chart`.
pub const DEFAULT_MA_FAST: u32 = 21;
/// Default slow window for `/chart` and `/hist_chart`.
pub const DEFAULT_MA_SLOW: u32 = 50;

pub const CHART_USAGE: &str = "Usage: /chart <symbol> <tf> [ma_type] [ma_fast] [ma_slow]";
pub const HIST_CHART_USAGE: &str = "Usage: /hist_chart <symbol> <tf> [ma_type] [ma_fast] [ma_slow]";
pub const SET_ALERT_USAGE: &str = "Usage: /set_alert <symbol> <tf> <short_ma> <long_ma> [ma_type]";
pub const SET_CUSTOM_USAGE: &str = "Usage: /setcustom <key> <value>";

/// Arguments for `/chart` and `/hist_chart`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArgs {
    pub symbol: String,
    pub timeframe: String,
    pub ma_type: String,
    pub ma_fast: u32,
    pub ma_slow: u32,
}

/// Arguments for `/set_alert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertArgs {
    pub symbol: String,
    pub timeframe: String,
    pub ma_fast: u32,
    pub ma_slow: u32,
    pub ma_type: String,
}

/// A recognized chat command with resolved arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Chart(ChartArgs),
    HistChart(ChartArgs),
    SetAlert(AlertArgs),
    GetAlerts,
    SetCustom { key: String, value: String },
    ListCustoms,
}

/// Result of parsing one message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A recognized command with valid arguments.
    Command(BotCommand),
    /// Recognized command but too few arguments; reply with the usage line.
    Usage(&'static str),
    /// Recognized command with malformed arguments; reply with the reason.
    Rejected(String),
    /// No recognized command prefix; echo the input back.
    Echo(String),
}

/// Parses a message text into a command outcome.
///
/// Commands match on the literal first token; symbol is uppercased and
/// timeframe lowercased. Anything without a recognized prefix echoes.
pub fn parse(text: &str) -> ParseOutcome {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return ParseOutcome::Echo(text.to_string());
    };

    match head {
        "/start" => ParseOutcome::Command(BotCommand::Start),
        "/help" => ParseOutcome::Command(BotCommand::Help),
        "/chart" => parse_chart(&parts, CHART_USAGE).map_command(BotCommand::Chart),
        "/hist_chart" => parse_chart(&parts, HIST_CHART_USAGE).map_command(BotCommand::HistChart),
        "/set_alert" => parse_set_alert(&parts),
        "/get_alerts" => ParseOutcome::Command(BotCommand::GetAlerts),
        "/setcustom" => parse_set_custom(text, &parts),
        "/listcustoms" => ParseOutcome::Command(BotCommand::ListCustoms),
        _ => ParseOutcome::Echo(text.to_string()),
    }
}

/// Intermediate result for chart-style argument lists.
enum ChartParse {
    Args(ChartArgs),
    Usage(&'static str),
    Rejected(String),
}

impl ChartParse {
    fn map_command(self, wrap: fn(ChartArgs) -> BotCommand) -> ParseOutcome {
        match self {
            ChartParse::Args(args) => ParseOutcome::Command(wrap(args)),
            ChartParse::Usage(usage) => ParseOutcome::Usage(usage),
            ChartParse::Rejected(reason) => ParseOutcome::Rejected(reason),
        }
    }
}

fn parse_chart(parts: &[&str], usage: &'static str) -> ChartParse {
    if parts.len() < 3 {
        return ChartParse::Usage(usage);
    }

    let symbol = parts[1].to_uppercase();
    let timeframe = parts[2].to_lowercase();
    let ma_type = parts
        .get(3)
        .map(|s| s.to_string())
        .unwrap_or_else(|| DEFAULT_MA_TYPE.to_string());

    let ma_fast = match parts.get(4) {
        Some(s) => match s.parse::<u32>() {
            Ok(n) => n,
            Err(_) => return ChartParse::Rejected("ma_fast and ma_slow must be numbers.".into()),
        },
        None => DEFAULT_MA_FAST,
    };
    let ma_slow = match parts.get(5) {
        Some(s) => match s.parse::<u32>() {
            Ok(n) => n,
            Err(_) => return ChartParse::Rejected("ma_fast and ma_slow must be numbers.".into()),
        },
        None => DEFAULT_MA_SLOW,
    };

    ChartParse::Args(ChartArgs {
        symbol,
        timeframe,
        ma_type,
        ma_fast,
        ma_slow,
    })
}

fn parse_set_alert(parts: &[&str]) -> ParseOutcome {
    if parts.len() < 5 {
        return ParseOutcome::Usage(SET_ALERT_USAGE);
    }

    let symbol = parts[1].to_uppercase();
    let timeframe = parts[2].to_lowercase();
    let (Ok(ma_fast), Ok(ma_slow)) = (parts[3].parse::<u32>(), parts[4].parse::<u32>()) else {
        return ParseOutcome::Rejected("short_ma and long_ma must be numbers.".to_string());
    };
    let ma_type = parts
        .get(5)
        .map(|s| s.to_string())
        .unwrap_or_else(|| DEFAULT_MA_TYPE.to_string());

    ParseOutcome::Command(BotCommand::SetAlert(AlertArgs {
        symbol,
        timeframe,
        ma_fast,
        ma_slow,
        ma_type,
    }))
}

fn parse_set_custom(text: &str, parts: &[&str]) -> ParseOutcome {
    if parts.len() < 3 {
        return ParseOutcome::Usage(SET_CUSTOM_USAGE);
    }

    // Value is the remainder of the line after the key token, so JSON with
    // spaces like `[10, 6]` survives. Whitespace runs around the key are
    // collapsed, matching how the arity check tokenizes.
    let key = parts[1].to_string();
    let after_key = text
        .trim_start()
        .strip_prefix(parts[0])
        .unwrap_or_default()
        .trim_start()
        .strip_prefix(parts[1])
        .unwrap_or_default();
    let value = after_key.trim().to_string();

    ParseOutcome::Command(BotCommand::SetCustom { key, value })
}
