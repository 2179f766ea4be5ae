//! Request handler errors

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use thiserror::Error;

use crate::http;

/// Recoverable per-request failures, each surfaced as `{"error": ...}`
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Body is not valid JSON (empty bodies included)
    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("failed to read request body: {0}")]
    BodyRead(String),
}

impl HandlerError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody(_) | Self::BodyRead(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        http::json_error_response(self.status(), &self.to_string())
    }
}
