//! Test fixtures
//!
//! Provides TestEnvironment: handler dependencies over a fresh, migrated store.

#![allow(dead_code)]

use std::sync::Arc;

use regbot::storage::db::{self, IN_MEMORY};
use regbot::telegram::{RequestContext, Sender};
use regbot::HandlerDeps;
use tempfile::TempDir;

/// Complete test environment for handler tests
///
/// # Example
/// ```ignore
/// let env = TestEnvironment::in_memory();
/// let reply = handle_register_command(&env.deps, &user_ctx(1)).await;
/// assert!(reply.contains("registered"));
/// ```
pub struct TestEnvironment {
    pub deps: HandlerDeps,
    /// Keeps the on-disk database alive for file-backed environments
    _dir: Option<TempDir>,
}

impl TestEnvironment {
    /// Single-connection in-memory store
    pub fn in_memory() -> Self {
        let pool = db::create_pool(IN_MEMORY).expect("Failed to create test database");
        Self {
            deps: HandlerDeps::new(Arc::new(pool)),
            _dir: None,
        }
    }

    /// Multi-connection store backed by a temporary SQLite file
    pub fn on_disk() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("test.sqlite");
        let pool = db::create_pool(path.to_str().expect("temp path is not UTF-8")).expect("Failed to create test database");
        Self {
            deps: HandlerDeps::new(Arc::new(pool)),
            _dir: Some(dir),
        }
    }

    /// Runs the authorization stage for `id` the way the dispatcher does.
    pub async fn resolve(&self, id: u64) -> RequestContext {
        RequestContext::resolve(&self.deps.db_pool, Sender::new(id, None))
            .await
            .expect("admin lookup failed")
    }

    /// Runs raw SQL against the store, e.g. to break it on purpose.
    pub async fn execute(&self, sql: &'static str) {
        db::with_connection(&self.deps.db_pool, move |conn| conn.execute_batch(sql))
            .await
            .expect("Failed to execute SQL");
    }

    /// Inserts user rows directly, bypassing the handlers.
    pub async fn seed_users(&self, ids: std::ops::Range<u64>) {
        db::with_connection(&self.deps.db_pool, move |conn| {
            for id in ids {
                db::create_user(conn, &id.to_string())?;
            }
            Ok(())
        })
        .await
        .expect("Failed to seed users");
    }

    /// Number of rows in the users table
    pub async fn user_count(&self) -> usize {
        db::with_connection(&self.deps.db_pool, db::get_all_users)
            .await
            .expect("Failed to list users")
            .len()
    }
}
