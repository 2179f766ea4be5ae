//! Startup error types
//!
//! Everything that can stop the server before it starts accepting requests.

use std::net::SocketAddr;
use thiserror::Error;

/// Fatal errors raised while configuring, binding or starting the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logger(String),
}
