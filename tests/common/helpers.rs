//! Test helpers for building request contexts without Telegram messages

#![allow(dead_code)]

use regbot::telegram::{RequestContext, Sender};

/// Context for a sender that is not an admin.
pub fn user_ctx(id: u64) -> RequestContext {
    RequestContext {
        sender: Sender::new(id, Some("test_user")),
        is_admin: false,
    }
}

/// Context for a sender the authorization stage marked as admin.
pub fn admin_ctx(id: u64) -> RequestContext {
    RequestContext {
        sender: Sender::new(id, Some("test_admin")),
        is_admin: true,
    }
}
