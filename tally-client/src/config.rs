//! Client configuration

use std::time::Duration;

/// Configuration for talking to the order backend
///
/// # Environment variables
///
/// All settings can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | TALLY_SERVER_URL | http://localhost:5000 | Backend base URL |
/// | TALLY_TIMEOUT_SECS | 30 | Request timeout in seconds |
/// | TALLY_DEBOUNCE_MS | 40 | Lookup debounce delay in milliseconds |
/// | TALLY_LOG_LEVEL | info | Log level |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g. "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Debounce delay for search-as-you-type lookups, in milliseconds
    pub debounce_ms: u64,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
}

impl ClientConfig {
    /// New configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
            debounce_ms: 40,
            log_level: "info".to_string(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the defaults above.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("TALLY_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:5000".into()),
            timeout_secs: std::env::var("TALLY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            debounce_ms: std::env::var("TALLY_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(40),
            log_level: std::env::var("TALLY_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Set the lookup debounce delay
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parsed log level; unrecognized values fall back to INFO
    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}
