//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; storage and chart modules have their
//! own error types that convert into it.

use thiserror::Error;

use crate::chart::ChartError;
use crate::storage::StorageError;

/// Top-level error for the bot (storage, transport, chart).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
