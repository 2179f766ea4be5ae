//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - `tracing` subscriber setup
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging

mod format;

pub use format::AccessLogEntry;

use crate::config::{Config, LoggingConfig};
use crate::error::ServerError;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Initialize the global `tracing` subscriber
///
/// `RUST_LOG` wins over `logging.level`. Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> Result<(), ServerError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| ServerError::Logger(e.to_string()))
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!("pingserve started successfully");
    tracing::info!("Listening on: http://{addr}");
    tracing::info!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if config.logging.access_log {
        tracing::info!("Access log format: {}", config.logging.access_log_format);
    }
    tracing::info!("  - GET  http://{addr}/ping");
    tracing::info!("  - GET  http://{addr}/fuck");
    tracing::info!("  - POST http://{addr}/post");
    tracing::info!("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Log a decoded request payload (diagnostic only)
pub fn log_payload(value: &serde_json::Value) {
    tracing::info!("User data: {value}");
}

pub fn log_panic(method: &str, path: &str, message: &str) {
    tracing::error!("Panic recovered while handling {method} {path}: {message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: "access", "{}", entry.format(format));
}
