//! Core types and traits: Bot, Update, error, logger.
//! Transport-agnostic; the teloxide layer converts into these shapes.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{CallbackAction, Chat, IncomingMessage, KeyboardButton, Update, User};
