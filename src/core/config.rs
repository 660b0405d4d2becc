use once_cell::sync::Lazy;
use simplelog::LevelFilter;
use std::env;

/// Port the liveness listener binds when PORT is unset or invalid
pub const DEFAULT_PORT: u16 = 3000;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
/// Empty when neither is set; the bot refuses to start in that case
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_default()
});

/// Liveness listener port
/// Read from PORT environment variable
/// Default: 3000
pub static PORT: Lazy<u16> = Lazy::new(|| parse_port(env::var("PORT").ok().as_deref()));

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: database.sqlite
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "database.sqlite".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Log level for console and file output
/// Read from LOG_LEVEL environment variable (error, warn, info, debug, trace)
/// Default: info
pub static LOG_LEVEL: Lazy<LevelFilter> = Lazy::new(|| parse_log_level(env::var("LOG_LEVEL").ok().as_deref()));

/// Custom Bot API server URL (local telegram-bot-api instance)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok().filter(|s| !s.is_empty()));

/// Parses a port value, falling back to [`DEFAULT_PORT`] when missing or malformed.
pub fn parse_port(raw: Option<&str>) -> u16 {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_PORT,
        Some(value) => match value.parse::<u16>() {
            Ok(port) => port,
            Err(e) => {
                log::warn!("Invalid PORT value {:?} ({}), using {}", value, e, DEFAULT_PORT);
                DEFAULT_PORT
            }
        },
    }
}

/// Parses a log level name case-insensitively, defaulting to `Info`.
pub fn parse_log_level(raw: Option<&str>) -> LevelFilter {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") | Some("warning") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Network configuration
pub mod network {
    use std::time::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Must exceed the long-polling timeout teloxide uses
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Database configuration
pub mod database {
    use std::time::Duration;

    /// Maximum number of pooled SQLite connections
    pub const POOL_MAX_SIZE: u32 = 10;

    /// How long a connection waits on a locked database before failing (in seconds)
    pub const BUSY_TIMEOUT_SECS: u64 = 5;

    /// Busy timeout duration
    pub fn busy_timeout() -> Duration {
        Duration::from_secs(BUSY_TIMEOUT_SECS)
    }
}

/// Telegram message limits
pub mod telegram {
    /// Maximum characters in a single text message
    pub const MAX_MESSAGE_LENGTH: usize = 4096;
}
