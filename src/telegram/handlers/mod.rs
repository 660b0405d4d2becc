//! Telegram bot handler tree configuration
//!
//! This module provides the dispatcher schema for the bot. Command handlers
//! compute reply texts from the store and are public so integration tests can
//! drive them without a Telegram connection.

mod commands;
mod schema;
mod types;

pub use commands::{
    handle_adminregister_command, handle_command, handle_listusers_command, handle_myinfo_command, handle_register_command,
    handle_start_command,
};
pub use schema::{authorize, authorize_sender, schema};
pub use types::{HandlerDeps, HandlerError};
