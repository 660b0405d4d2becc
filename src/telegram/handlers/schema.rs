//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::handle_command;
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::auth::{RequestContext, Sender};
use crate::telegram::bot::Command;

/// Creates the dispatcher schema for the Telegram bot.
///
/// Command messages are parsed, then pass through [`authorize`], which injects a
/// [`RequestContext`] for the command endpoint. Anything that is not one of our
/// commands falls through to the dispatcher's default handler.
///
/// # Arguments
/// * `deps` - Handler dependencies (database pool)
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_auth = deps.clone();
    let deps_commands = deps;

    Update::filter_message()
        .filter_command::<Command>()
        .chain(authorize(deps_auth))
        .endpoint(move |bot: Bot, msg: Message, cmd: Command, ctx: RequestContext| {
            let deps = deps_commands.clone();
            async move {
                log::info!(
                    "Received command {:?} from {} in chat {} (admin: {})",
                    cmd,
                    ctx.sender.id,
                    msg.chat.id,
                    ctx.is_admin
                );

                for text in handle_command(&deps, cmd, &ctx).await {
                    bot.send_message(msg.chat.id, text).await?;
                }
                Ok::<(), HandlerError>(())
            }
        })
}

/// Authorization stage run ahead of every command handler.
///
/// Looks the sender up in the `admins` table and injects the resulting
/// [`RequestContext`]. Messages without a sender, and lookups that fail, stop
/// here: no handler runs for that update.
pub fn authorize(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::filter_map_async(move |msg: Message| {
        let deps = deps.clone();
        async move {
            let ctx = authorize_sender(&deps, Sender::from_message(&msg)).await;
            if ctx.is_none() {
                log::debug!("Command in chat {} stopped at authorization", msg.chat.id);
            }
            ctx
        }
    })
}

/// Resolves the request context for an optional sender.
///
/// `None` means the update must not reach a command handler.
pub async fn authorize_sender(deps: &HandlerDeps, sender: Option<Sender>) -> Option<RequestContext> {
    let Some(sender) = sender else {
        log::debug!("Ignoring command without a sender");
        return None;
    };

    let id = sender.id;
    match RequestContext::resolve(&deps.db_pool, sender).await {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            log::error!("Admin lookup failed for {}: {}", id, e);
            None
        }
    }
}
