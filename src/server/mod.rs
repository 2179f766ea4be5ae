// Server module entry point
// Listener setup, accept loop and per-connection serving

pub mod connection;
pub mod listener;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::error::ServerError;
use crate::logger;

pub use listener::create_listener;

/// HTTP server bound to its listen address
///
/// Built once at startup with [`Server::bind`] and consumed by [`Server::run`].
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    keep_alive: bool,
}

impl Server {
    /// Resolve the configured address and bind the listener
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        let addr = config.socket_addr()?;
        let listener =
            create_listener(addr).map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Self {
            listener,
            state: Arc::new(AppState::new(config)),
            keep_alive: config.server.keep_alive,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until the process is killed
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer_addr)) => {
                    connection::serve_connection(
                        stream,
                        peer_addr,
                        Arc::clone(&self.state),
                        self.keep_alive,
                    );
                }
                Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
            }
        }
    }
}
