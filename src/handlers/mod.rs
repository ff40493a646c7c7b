//! Update handlers. Currently a single router that owns the full command
//! set; the dispatcher feeds it one update at a time.

mod command_router;

pub use command_router::CommandRouter;
