//! Integration tests for the command handlers against a real SQLite store
//!
//! Run with: cargo test --test bot_commands_test

mod common;

use common::{admin_ctx, user_ctx, TestEnvironment};
use pretty_assertions::assert_eq;
use regbot::telegram::handlers::{
    handle_adminregister_command, handle_command, handle_listusers_command, handle_myinfo_command, handle_register_command,
    handle_start_command,
};
use regbot::telegram::{replies, Command};

// ============================================================================
// /register and /adminregister
// ============================================================================

#[tokio::test]
async fn test_register_twice_fails_second_time() {
    let env = TestEnvironment::in_memory();
    let ctx = user_ctx(1001);

    let first = handle_register_command(&env.deps, &ctx).await;
    assert!(
        first.starts_with("You have been successfully registered as a user. Your registration date is: "),
        "unexpected reply: {}",
        first
    );

    let second = handle_register_command(&env.deps, &ctx).await;
    assert_eq!(second, replies::REGISTER_ERROR);
    assert_eq!(env.user_count().await, 1);
}

#[tokio::test]
async fn test_adminregister_twice_fails_second_time() {
    let env = TestEnvironment::in_memory();
    let ctx = user_ctx(2002);

    assert_eq!(handle_adminregister_command(&env.deps, &ctx).await, replies::ADMIN_REGISTER_SUCCESS);
    assert_eq!(handle_adminregister_command(&env.deps, &ctx).await, replies::ADMIN_REGISTER_ERROR);
}

#[tokio::test]
async fn test_adminregister_does_not_create_user_row() {
    let env = TestEnvironment::in_memory();

    handle_adminregister_command(&env.deps, &user_ctx(3003)).await;

    assert_eq!(env.user_count().await, 0);
    assert_eq!(handle_myinfo_command(&env.deps, &user_ctx(3003)).await, replies::NOT_REGISTERED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_registrations_from_distinct_senders() {
    let env = TestEnvironment::on_disk();
    let (a, b) = (user_ctx(1), user_ctx(2));

    let (reply_a, reply_b) = tokio::join!(
        handle_register_command(&env.deps, &a),
        handle_register_command(&env.deps, &b)
    );

    assert_ne!(reply_a, replies::REGISTER_ERROR);
    assert_ne!(reply_b, replies::REGISTER_ERROR);
    assert_eq!(env.user_count().await, 2);
}

// ============================================================================
// /myinfo
// ============================================================================

#[tokio::test]
async fn test_myinfo_before_and_after_registration() {
    let env = TestEnvironment::in_memory();
    let ctx = user_ctx(4004);

    assert_eq!(handle_myinfo_command(&env.deps, &ctx).await, replies::NOT_REGISTERED);

    let registered = handle_register_command(&env.deps, &ctx).await;
    let timestamp = registered
        .rsplit("Your registration date is: ")
        .next()
        .expect("timestamp in reply")
        .to_string();

    let info = handle_myinfo_command(&env.deps, &ctx).await;
    assert_eq!(info, format!("Your registration date is: {}", timestamp));
}

#[tokio::test]
async fn test_myinfo_is_per_sender() {
    let env = TestEnvironment::in_memory();

    handle_register_command(&env.deps, &user_ctx(1)).await;

    assert_eq!(handle_myinfo_command(&env.deps, &user_ctx(2)).await, replies::NOT_REGISTERED);
}

// ============================================================================
// /listusers
// ============================================================================

#[tokio::test]
async fn test_listusers_denied_without_admin_row() {
    let env = TestEnvironment::in_memory();
    handle_register_command(&env.deps, &user_ctx(10)).await;
    handle_register_command(&env.deps, &user_ctx(11)).await;

    let ctx = env.resolve(99).await;
    assert!(!ctx.is_admin);

    let reply = handle_listusers_command(&env.deps, &ctx).await;
    assert_eq!(reply, vec![replies::NOT_AUTHORIZED.to_string()]);
    assert!(!reply[0].contains("10"));
}

#[tokio::test]
async fn test_listusers_after_adminregister_lists_all_users() {
    let env = TestEnvironment::in_memory();
    handle_register_command(&env.deps, &user_ctx(10)).await;
    handle_register_command(&env.deps, &user_ctx(11)).await;

    handle_adminregister_command(&env.deps, &user_ctx(99)).await;
    let ctx = env.resolve(99).await;
    assert!(ctx.is_admin);

    let pages = handle_listusers_command(&env.deps, &ctx).await;
    assert_eq!(pages.len(), 1);

    let page = &pages[0];
    assert!(page.starts_with(replies::LIST_HEADER));
    assert!(page.contains("Username: 10, Registration Date: "));
    assert!(page.contains("Username: 11, Registration Date: "));
    assert!(!page.contains("Username: 99"));
}

#[tokio::test]
async fn test_listusers_with_no_users() {
    let env = TestEnvironment::in_memory();

    let pages = handle_listusers_command(&env.deps, &admin_ctx(1)).await;

    assert_eq!(pages, vec![format!("{}{}", replies::LIST_HEADER, replies::LIST_EMPTY)]);
}

// ============================================================================
// /start
// ============================================================================

#[tokio::test]
async fn test_start_is_static_regardless_of_state() {
    let env = TestEnvironment::in_memory();
    let before = handle_start_command();

    handle_register_command(&env.deps, &user_ctx(5)).await;
    handle_adminregister_command(&env.deps, &user_ctx(5)).await;

    assert_eq!(handle_start_command(), before);
    assert!(before.contains("/listusers - List all registered users"));
}

// ============================================================================
// Store failures map to generic replies
// ============================================================================

#[tokio::test]
async fn test_myinfo_reports_generic_error_when_store_fails() {
    let env = TestEnvironment::in_memory();
    handle_register_command(&env.deps, &user_ctx(1)).await;
    env.execute("DROP TABLE users").await;

    let reply = handle_myinfo_command(&env.deps, &user_ctx(1)).await;

    assert_eq!(reply, "Error fetching user info.");
    assert_eq!(reply, replies::MYINFO_ERROR);
}

#[tokio::test]
async fn test_listusers_reports_generic_error_when_store_fails() {
    let env = TestEnvironment::in_memory();
    env.execute("DROP TABLE users").await;

    let reply = handle_listusers_command(&env.deps, &admin_ctx(1)).await;

    assert_eq!(reply, vec!["Error listing users.".to_string()]);
    assert_eq!(reply, vec![replies::LIST_ERROR.to_string()]);
}

#[tokio::test]
async fn test_register_reports_generic_error_when_store_fails() {
    let env = TestEnvironment::in_memory();
    env.execute("DROP TABLE users").await;

    assert_eq!(handle_register_command(&env.deps, &user_ctx(1)).await, replies::REGISTER_ERROR);
}

#[tokio::test]
async fn test_adminregister_reports_generic_error_when_store_fails() {
    let env = TestEnvironment::in_memory();
    env.execute("DROP TABLE admins").await;

    assert_eq!(
        handle_adminregister_command(&env.deps, &user_ctx(1)).await,
        replies::ADMIN_REGISTER_ERROR
    );
}

// ============================================================================
// Command routing
// ============================================================================

#[tokio::test]
async fn test_each_command_routes_to_its_handler() {
    let env = TestEnvironment::in_memory();
    let ctx = user_ctx(8);

    assert_eq!(handle_command(&env.deps, Command::Start, &ctx).await, vec![replies::START_TEXT.to_string()]);
    assert_eq!(
        handle_command(&env.deps, Command::MyInfo, &ctx).await,
        vec![replies::NOT_REGISTERED.to_string()]
    );

    let registered = handle_command(&env.deps, Command::Register, &ctx).await;
    assert_eq!(registered.len(), 1);
    assert!(registered[0].starts_with("You have been successfully registered as a user."));
    assert_eq!(env.user_count().await, 1);

    assert_eq!(
        handle_command(&env.deps, Command::AdminRegister, &ctx).await,
        vec![replies::ADMIN_REGISTER_SUCCESS.to_string()]
    );
    assert_eq!(
        handle_command(&env.deps, Command::ListUsers, &ctx).await,
        vec![replies::NOT_AUTHORIZED.to_string()]
    );

    let admin = env.resolve(8).await;
    let pages = handle_command(&env.deps, Command::ListUsers, &admin).await;
    assert_eq!(pages.len(), 1);
    assert!(pages[0].contains("Username: 8, Registration Date: "));
}

#[tokio::test]
async fn test_listusers_routes_every_page() {
    let env = TestEnvironment::in_memory();
    env.seed_users(1000..1200).await;

    let pages = handle_command(&env.deps, Command::ListUsers, &admin_ctx(1)).await;

    assert!(pages.len() > 1, "expected several pages, got {}", pages.len());
    assert!(pages[0].starts_with(replies::LIST_HEADER));
    for page in &pages {
        assert!(page.len() <= 4096);
    }
    for page in &pages[1..] {
        assert!(page.starts_with(replies::LIST_HEADER_CONTINUED));
    }

    let listed = pages.iter().map(|p| p.matches("Username: ").count()).sum::<usize>();
    assert_eq!(listed, 200);
    assert!(pages.last().is_some_and(|p| p.contains("Username: 1199,")));
}
