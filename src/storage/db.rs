use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension, Result};
use serde::Serialize;
use std::sync::Arc;

use crate::core::config;
use crate::core::error::AppResult;
use crate::storage::migrations::run_migrations;

/// A self-registered bot user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Auto-incremented row id
    pub id: i64,
    /// Sender identifier the row was registered under
    pub username: String,
    /// Always "user" for rows created through /register
    pub role: String,
    /// Set by SQLite when the row is inserted
    pub created_at: DateTime<Utc>,
}

/// A self-registered admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Path that selects a private in-memory database instead of a file.
pub const IN_MEMORY: &str = ":memory:";

/// Create a new database connection pool
///
/// Every pooled connection gets a busy timeout, and the schema is migrated on the
/// first connection before the pool is handed out.
///
/// An in-memory database exists only as long as its connection, so `":memory:"`
/// yields a single-connection pool that never recycles that connection.
///
/// # Example
///
/// ```no_run
/// use regbot::storage::db;
///
/// let pool = db::create_pool("database.sqlite")?;
/// # Ok::<(), regbot::core::error::AppError>(())
/// ```
pub fn create_pool(database_path: &str) -> AppResult<DbPool> {
    let busy_timeout = config::database::busy_timeout();
    let pool = if database_path == IN_MEMORY {
        let manager = SqliteConnectionManager::memory().with_init(move |c| c.busy_timeout(busy_timeout));
        Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?
    } else {
        let manager = SqliteConnectionManager::file(database_path).with_init(move |c| c.busy_timeout(busy_timeout));
        Pool::builder().max_size(config::database::POOL_MAX_SIZE).build(manager)?
    };

    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;
    drop(conn);

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> std::result::Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Runs a store operation on tokio's blocking pool.
///
/// SQLite calls block the calling thread, so handlers go through this helper to
/// keep the dispatcher free to accept other updates while the query runs.
pub async fn with_connection<T, F>(pool: &Arc<DbPool>, f: F) -> AppResult<T>
where
    F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = Arc::clone(pool);
    tokio::task::spawn_blocking(move || -> AppResult<T> {
        let conn = get_connection(&pool)?;
        Ok(f(&conn)?)
    })
    .await?
}

fn user_from_row(row: &rusqlite::Row<'_>) -> Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        role: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn admin_from_row(row: &rusqlite::Row<'_>) -> Result<Admin> {
    Ok(Admin {
        id: row.get(0)?,
        username: row.get(1)?,
        created_at: row.get(2)?,
    })
}

/// Inserts a user row. Role and creation time come from column defaults.
///
/// Fails with a constraint violation when `username` is already registered.
pub fn create_user(conn: &Connection, username: &str) -> Result<User> {
    conn.query_row(
        "INSERT INTO users (username) VALUES (?1) RETURNING id, username, role, created_at",
        params![username],
        user_from_row,
    )
}

/// Inserts an admin row.
///
/// Fails with a constraint violation when `username` is already an admin.
pub fn create_admin(conn: &Connection, username: &str) -> Result<Admin> {
    conn.query_row(
        "INSERT INTO admins (username) VALUES (?1) RETURNING id, username, created_at",
        params![username],
        admin_from_row,
    )
}

/// Looks up a single user by the identifier it was registered under.
///
/// Returns `Ok(None)` when no such user exists.
pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    conn.query_row(
        "SELECT id, username, role, created_at FROM users WHERE username = ?1",
        params![username],
        user_from_row,
    )
    .optional()
}

/// Returns every registered user, oldest first.
pub fn get_all_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, username, role, created_at FROM users ORDER BY id")?;
    let rows = stmt.query_map([], user_from_row)?;

    let mut users = Vec::new();
    for row in rows {
        users.push(row?);
    }
    Ok(users)
}

/// Checks whether `username` has an admin row.
pub fn admin_exists(conn: &Connection, username: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM admins WHERE username = ?1)",
        params![username],
        |row| row.get(0),
    )
}
