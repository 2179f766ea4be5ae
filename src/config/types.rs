// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::num::NonZeroUsize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 6060;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_ACCESS_LOG_FORMAT: &str = "combined";
pub const DEFAULT_MAX_BODY_SIZE: u64 = 10_485_760; // 10MB

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads (CPU cores when unset); zero is rejected at load
    #[serde(default)]
    pub workers: Option<NonZeroUsize>,
    #[serde(default = "default_keep_alive")]
    pub keep_alive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: None,
            keep_alive: default_keep_alive(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_keep_alive() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    pub level: String,
    /// Emit JSON instead of human-readable lines
    #[serde(default)]
    pub json: bool,
    pub access_log: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
            access_log: true,
            access_log_format: default_access_log_format(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    DEFAULT_ACCESS_LOG_FORMAT.to_string()
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub max_body_size: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}
