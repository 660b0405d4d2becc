//! Logging initialization
//!
//! Console output goes through `TermLogger`; the same records are appended to
//! the configured log file.

use anyhow::{Context, Result};
use simplelog::{ColorChoice, CombinedLogger, Config, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file (appended to, created if missing)
/// * `level` - Minimum level written to both sinks
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Log file could not be opened or a logger was already set
pub fn init_logger(log_file_path: &str, level: LevelFilter) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("Failed to open log file {}", log_file_path))?;

    CombinedLogger::init(vec![
        TermLogger::new(level, logger_config(), TerminalMode::Mixed, ColorChoice::Auto),
        WriteLogger::new(level, logger_config(), log_file),
    ])
    .context("Failed to initialize logger")?;

    Ok(())
}

/// Quiets the HTTP and Telegram client internals so bot logs stay readable.
fn logger_config() -> Config {
    ConfigBuilder::new()
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .add_filter_ignore_str("h2")
        .build()
}
