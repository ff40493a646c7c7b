//! Storage module: SQLite persistence for users, alerts, and customs.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserRecord, AlertRecord, CustomRecord
//! - [`bot_repo`] – BotRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod bot_repo;
mod error;
mod models;
mod sqlite_pool;

pub use bot_repo::BotRepository;
pub use error::StorageError;
pub use models::{AlertRecord, CustomRecord, UserRecord};
pub use sqlite_pool::SqlitePoolManager;
