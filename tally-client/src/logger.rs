//! Logging Infrastructure
//!
//! Structured logging setup for hosts embedding the client.

/// Initialize the logger
pub fn init_logger(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .init();
}

/// Initialize the logger from `TALLY_LOG_LEVEL`
pub fn init_logger_from_env() {
    let level = std::env::var("TALLY_LOG_LEVEL")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(tracing::Level::INFO);
    init_logger(level);
}
