//! Sender identity and admin authorization
//!
//! Every command passes through [`RequestContext::resolve`] before its handler runs.
//! The admin decision itself is [`is_admin`], a plain function of the store and the
//! sender identifier, so it can be tested without a dispatcher.

use std::fmt;
use std::sync::Arc;

use teloxide::types::{Message, UserId};

use crate::core::error::AppResult;
use crate::storage::db::{self, DbPool};

/// Stable numeric Telegram identifier of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SenderId(pub u64);

impl SenderId {
    /// Value stored in the `username` column of both tables.
    pub fn as_key(&self) -> String {
        self.0.to_string()
    }
}

impl From<UserId> for SenderId {
    fn from(id: UserId) -> Self {
        SenderId(id.0)
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who sent a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: SenderId,
    /// Display username (@handle). Mutable and optional, so only used for logging.
    pub username: Option<String>,
}

impl Sender {
    pub fn new(id: u64, username: Option<&str>) -> Self {
        Self {
            id: SenderId(id),
            username: username.map(str::to_string),
        }
    }

    /// Extracts the sender of a message. Channel posts carry no sender.
    pub fn from_message(msg: &Message) -> Option<Self> {
        msg.from.as_ref().map(|user| Self {
            id: user.id.into(),
            username: user.username.clone(),
        })
    }
}

/// Per-command context produced by the authorization stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub sender: Sender,
    pub is_admin: bool,
}

impl RequestContext {
    /// Resolves the admin flag for `sender` with one store read.
    pub async fn resolve(pool: &Arc<DbPool>, sender: Sender) -> AppResult<Self> {
        let is_admin = is_admin(pool, sender.id).await?;
        Ok(Self { sender, is_admin })
    }
}

/// Returns true when `sender` has a row in the `admins` table.
pub async fn is_admin(pool: &Arc<DbPool>, sender: SenderId) -> AppResult<bool> {
    let key = sender.as_key();
    db::with_connection(pool, move |conn| db::admin_exists(conn, &key)).await
}
