use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use regbot::cli::{Cli, Commands};
use regbot::core::{config, health_server, init_logger};
use regbot::storage::{create_pool, db, with_connection};
use regbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if logging cannot be initialized or a one-shot subcommand fails.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH, *config::LOG_LEVEL)?;

    match cli.command {
        Some(Commands::Run { port }) => run(port.unwrap_or(*config::PORT)).await,
        Some(Commands::Migrate) => run_migrate(),
        Some(Commands::ListUsers { json }) => run_list_users(json).await,
        None => {
            log::info!("No command specified, running bot in default mode");
            run(*config::PORT).await
        }
    }
}

/// Starts the liveness listener and the bot side by side.
///
/// A bot that cannot start (store or token problem) is logged; the liveness
/// listener keeps serving regardless. The process fails only when neither runs.
async fn run(port: u16) -> Result<()> {
    let health = tokio::spawn(async move {
        let result = health_server::start_health_server(port).await;
        if let Err(e) = &result {
            log::error!("Liveness server error: {}", e);
        }
        result
    });

    if let Err(e) = run_bot().await {
        log::error!("Bot not started: {:#}", e);
        health
            .await
            .context("liveness listener task failed")?
            .context("neither the bot nor the liveness listener is running")?;
    }

    Ok(())
}

/// Prepares the store, then long-polls Telegram until Ctrl-C.
async fn run_bot() -> Result<()> {
    let db_pool = Arc::new(create_pool(&config::DATABASE_PATH).context("Error syncing database")?);
    log::info!("Database & tables created! ({})", config::DATABASE_PATH.as_str());

    let bot = create_bot(&config::BOT_TOKEN)?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let handler = schema(HandlerDeps::new(db_pool));

    log::info!("Bot started in long polling mode, ready to receive commands");

    Dispatcher::builder(bot, handler)
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

/// Run the migrate command
fn run_migrate() -> Result<()> {
    create_pool(&config::DATABASE_PATH).context("Error syncing database")?;
    log::info!("Database & tables created! ({})", config::DATABASE_PATH.as_str());
    Ok(())
}

/// Run the list-users command
async fn run_list_users(json: bool) -> Result<()> {
    let db_pool = Arc::new(create_pool(&config::DATABASE_PATH).context("Error syncing database")?);
    let users = with_connection(&db_pool, db::get_all_users).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
    } else {
        for user in &users {
            println!(
                "{}\t{}\t{}\t{}",
                user.id,
                user.username,
                user.role,
                regbot::telegram::replies::format_timestamp(&user.created_at)
            );
        }
        log::info!("{} registered user(s)", users.len());
    }

    Ok(())
}
