//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command menu registration

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Commands available:")]
pub enum Command {
    #[command(description = "show the welcome message and command list")]
    Start,
    #[command(description = "register as a user")]
    Register,
    #[command(description = "register as an admin")]
    AdminRegister,
    #[command(description = "view your registration info")]
    MyInfo,
    #[command(description = "list all registered users (admins only)")]
    ListUsers,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Arguments
/// * `token` - Bot token from BotFather
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(AppError)` - Empty token, invalid BOT_API_URL or HTTP client failure
pub fn create_bot(token: &str) -> AppResult<Bot> {
    if token.trim().is_empty() {
        return Err(AppError::Config("BOT_TOKEN environment variable not set".to_string()));
    }

    let client = ClientBuilder::new()
        .timeout(config::network::timeout())
        .build()
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

    let bot = Bot::with_client(token.trim(), client);
    let bot = match config::BOT_API_URL.as_deref() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            bot.set_api_url(url::Url::parse(bot_api_url)?)
        }
        None => bot,
    };

    Ok(bot)
}

/// Publishes the command list shown in Telegram's command menu
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}
