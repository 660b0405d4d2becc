//! regbot - Telegram bot for self-service user and admin registration
//!
//! Users register themselves with `/register`, anyone can become an admin with
//! `/adminregister`, and admins can list registered users with `/listusers`.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging and the HTTP liveness listener
//! - `storage`: SQLite pool, migrations and queries
//! - `telegram`: commands, authorization, replies and the dispatcher schema

pub mod cli;
pub mod core;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use crate::storage::{create_pool, get_connection, DbConnection, DbPool};
pub use crate::telegram::{schema, HandlerDeps};
