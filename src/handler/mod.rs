//! Request handler module
//!
//! Entry point for every HTTP request: wraps routing in the access log and
//! panic recovery middleware.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod writer;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::AppState;
use crate::middleware::{self, AccessLog};

pub use error::HandlerError;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let access = state
        .logging
        .access_log
        .then(|| AccessLog::begin(&req, peer_addr));

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let response = middleware::recover(&method, &path, router::route(req, &state)).await;

    if let Some(access) = access {
        access.finish(&response, &state.logging.access_log_format);
    }
    Ok(response)
}
