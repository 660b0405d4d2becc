use thiserror::Error;

/// Centralized error types for the application
///
/// Store, Telegram and startup failures are converted to this enum so callers can
/// log them uniformly. None of these details are ever shown to a chat user; handlers
/// map them to the generic replies in [`crate::telegram::replies`].
///
/// # Example
///
/// ```no_run
/// use regbot::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     log::error!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors (including UNIQUE constraint violations)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database connection pool errors
    #[error("Database pool error: {0}")]
    DatabasePool(#[from] r2d2::Error),

    /// Schema migration errors
    #[error("Migration error: {0}")]
    Migration(#[from] refinery::Error),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A blocking store task panicked or was cancelled
    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl AppError {
    /// True when the underlying SQLite error is a constraint violation,
    /// e.g. registering the same identifier twice.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            AppError::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
