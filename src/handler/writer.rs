//! Single-write response writer
//!
//! Lets a handler issue several writes for one request while guaranteeing
//! only the first reaches the client. Later writes are dropped and logged.
//! Only the double-response endpoint uses this; every other handler returns
//! its response directly.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::http;
use crate::logger;

#[derive(Debug, Default)]
pub struct ResponseWriter {
    written: Option<Response<Full<Bytes>>>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a JSON response, unless one was already written
    pub fn json<T: Serialize + ?Sized>(&mut self, status: StatusCode, body: &T) {
        if let Some(first) = &self.written {
            logger::log_warning(&format!(
                "Response already written. Dropped write with status {} (kept {})",
                status.as_u16(),
                first.status().as_u16()
            ));
            return;
        }
        self.written = Some(http::json_response(status, body));
    }

    /// Hand over the response; empty 200 if nothing was written
    pub fn finish(self) -> Response<Full<Bytes>> {
        self.written
            .unwrap_or_else(|| http::build_empty_response(StatusCode::OK))
    }
}
