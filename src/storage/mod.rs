//! SQLite store: connection pool, schema migrations and user/admin queries

pub mod db;
pub mod migrations;

// Re-exports for convenience
pub use db::{create_pool, get_connection, with_connection, Admin, DbConnection, DbPool, User};
