// Application state module
// Read-only settings shared by every connection

use super::types::{Config, HttpConfig, LoggingConfig};

/// Application state
///
/// Built once at startup and shared behind an `Arc`; nothing in it changes
/// while the server runs.
#[derive(Debug, Clone)]
pub struct AppState {
    pub logging: LoggingConfig,
    pub http: HttpConfig,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            logging: config.logging.clone(),
            http: config.http.clone(),
        }
    }
}
