// Connection handling module
// Serves a single TCP connection

use std::net::SocketAddr;
use std::sync::Arc;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Configures HTTP/1.1 connection settings (keep-alive)
/// 3. Serves every request on the connection with the request handler
/// 4. Logs connection-level errors; they never reach the accept loop
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address, used by the access log
/// * `state` - Shared application state
/// * `keep_alive` - Whether to keep the connection open between requests
pub fn serve_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    keep_alive: bool,
) {
    logger::log_connection_accepted(&peer_addr);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(keep_alive);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, peer_addr, Arc::clone(&state))),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
