//! Telegram bot integration: commands, authorization, replies and handlers

pub mod auth;
pub mod bot;
pub mod handlers;
pub mod replies;

// Re-exports for convenience
pub use auth::{is_admin, RequestContext, Sender, SenderId};
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
