//! Core utilities: configuration, errors, logging and the liveness listener

pub mod config;
pub mod error;
pub mod health_server;
pub mod logging;

// Re-exports for convenience
pub use error::{AppError, AppResult};
pub use logging::init_logger;
