//! Reply texts sent back to chat users
//!
//! Failure replies are deliberately generic: the cause is logged, never shown.

use chrono::{DateTime, Utc};
use indoc::indoc;

use crate::storage::db::User;

pub const START_TEXT: &str = indoc! {"
    Welcome to the bot!

    Commands available:
    /register - Register as a user
    /adminregister - Register as an admin
    /myinfo - View your registration info
    /listusers - List all registered users"};

pub const REGISTER_ERROR: &str = "Error registering user.";
pub const ADMIN_REGISTER_SUCCESS: &str = "You have been successfully registered as an admin.";
pub const ADMIN_REGISTER_ERROR: &str = "Error registering admin.";
pub const NOT_REGISTERED: &str = "You are not registered yet.";
pub const MYINFO_ERROR: &str = "Error fetching user info.";
pub const NOT_AUTHORIZED: &str = "You are not authorized to use this command.";
pub const LIST_ERROR: &str = "Error listing users.";

pub const LIST_HEADER: &str = "List of registered users:\n";
pub const LIST_HEADER_CONTINUED: &str = "List of registered users (continued):\n";
pub const LIST_EMPTY: &str = "No users registered yet.";

/// Formats a stored timestamp the same way in every reply.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn register_success(created_at: &DateTime<Utc>) -> String {
    format!(
        "You have been successfully registered as a user. Your registration date is: {}",
        format_timestamp(created_at)
    )
}

pub fn registration_date(created_at: &DateTime<Utc>) -> String {
    format!("Your registration date is: {}", format_timestamp(created_at))
}

fn user_line(user: &User) -> String {
    format!(
        "Username: {}, Registration Date: {}\n",
        user.username,
        format_timestamp(&user.created_at)
    )
}

/// Renders the user listing as one or more messages of at most `max_len` bytes.
///
/// The first page starts with [`LIST_HEADER`], later pages with
/// [`LIST_HEADER_CONTINUED`]. Lines are never split across pages.
pub fn user_list_pages(users: &[User], max_len: usize) -> Vec<String> {
    if users.is_empty() {
        return vec![format!("{}{}", LIST_HEADER, LIST_EMPTY)];
    }

    let mut pages = Vec::new();
    let mut page = String::from(LIST_HEADER);
    let mut page_has_lines = false;

    for user in users {
        let line = user_line(user);
        if page_has_lines && page.len() + line.len() > max_len {
            pages.push(page.trim_end().to_string());
            page = String::from(LIST_HEADER_CONTINUED);
        }
        page.push_str(&line);
        page_has_lines = true;
    }
    pages.push(page.trim_end().to_string());

    pages
}
