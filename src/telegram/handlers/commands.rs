//! Command handler implementations (/start, /register, /adminregister, /myinfo, /listusers)
//!
//! Each handler performs at most one store operation and returns the text to send.
//! Store failures are logged here and turned into the generic replies.

use super::types::HandlerDeps;
use crate::core::config;
use crate::core::error::AppError;
use crate::storage::db;
use crate::telegram::auth::RequestContext;
use crate::telegram::bot::Command;
use crate::telegram::replies;

/// Runs the handler for `cmd` and returns the messages to send, in order.
pub async fn handle_command(deps: &HandlerDeps, cmd: Command, ctx: &RequestContext) -> Vec<String> {
    match cmd {
        Command::Start => vec![handle_start_command().to_string()],
        Command::Register => vec![handle_register_command(deps, ctx).await],
        Command::AdminRegister => vec![handle_adminregister_command(deps, ctx).await],
        Command::MyInfo => vec![handle_myinfo_command(deps, ctx).await],
        Command::ListUsers => handle_listusers_command(deps, ctx).await,
    }
}

/// Duplicate registrations log at warn, other failures at error.
fn log_registration_error(kind: &str, ctx: &RequestContext, e: &AppError) {
    if e.is_constraint_violation() {
        log::warn!("{} {} is already registered", kind, ctx.sender.id);
    } else {
        log::error!("Error registering {} {}: {}", kind.to_lowercase(), ctx.sender.id, e);
    }
}

/// Handle /start command
pub fn handle_start_command() -> &'static str {
    replies::START_TEXT
}

/// Handle /register command
pub async fn handle_register_command(deps: &HandlerDeps, ctx: &RequestContext) -> String {
    let key = ctx.sender.id.as_key();

    match db::with_connection(&deps.db_pool, move |conn| db::create_user(conn, &key)).await {
        Ok(user) => {
            log::info!("Registered user {} (row id {})", user.username, user.id);
            replies::register_success(&user.created_at)
        }
        Err(e) => {
            log_registration_error("User", ctx, &e);
            replies::REGISTER_ERROR.to_string()
        }
    }
}

/// Handle /adminregister command
///
/// Open to every sender; there is no permission gate on becoming an admin.
pub async fn handle_adminregister_command(deps: &HandlerDeps, ctx: &RequestContext) -> String {
    let key = ctx.sender.id.as_key();

    match db::with_connection(&deps.db_pool, move |conn| db::create_admin(conn, &key)).await {
        Ok(admin) => {
            log::info!("Registered admin {} (row id {})", admin.username, admin.id);
            replies::ADMIN_REGISTER_SUCCESS.to_string()
        }
        Err(e) => {
            log_registration_error("Admin", ctx, &e);
            replies::ADMIN_REGISTER_ERROR.to_string()
        }
    }
}

/// Handle /myinfo command
pub async fn handle_myinfo_command(deps: &HandlerDeps, ctx: &RequestContext) -> String {
    let key = ctx.sender.id.as_key();
    log::debug!(
        "Looking up user {} (display username {:?})",
        ctx.sender.id,
        ctx.sender.username
    );

    match db::with_connection(&deps.db_pool, move |conn| db::get_user_by_username(conn, &key)).await {
        Ok(Some(user)) => {
            log::debug!("User found: {:?}", user);
            replies::registration_date(&user.created_at)
        }
        Ok(None) => replies::NOT_REGISTERED.to_string(),
        Err(e) => {
            log::error!("Error fetching user info for {}: {}", ctx.sender.id, e);
            replies::MYINFO_ERROR.to_string()
        }
    }
}

/// Handle /listusers command
///
/// Admin only. Returns one or more messages, each within Telegram's size limit.
pub async fn handle_listusers_command(deps: &HandlerDeps, ctx: &RequestContext) -> Vec<String> {
    if !ctx.is_admin {
        log::warn!("User {} tried to access /listusers without permission", ctx.sender.id);
        return vec![replies::NOT_AUTHORIZED.to_string()];
    }

    match db::with_connection(&deps.db_pool, db::get_all_users).await {
        Ok(users) => {
            log::debug!("Found {} users in database", users.len());
            replies::user_list_pages(&users, config::telegram::MAX_MESSAGE_LENGTH)
        }
        Err(e) => {
            log::error!("Error listing users for {}: {}", ctx.sender.id, e);
            vec![replies::LIST_ERROR.to_string()]
        }
    }
}
