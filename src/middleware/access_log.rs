//! Request logging wrapper
//!
//! Captures request details before routing and emits one access log line once
//! the response is ready.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::net::SocketAddr;
use std::time::Instant;

use crate::logger::{self, AccessLogEntry};

/// In-flight access log record for one request
pub struct AccessLog {
    entry: AccessLogEntry,
    started: Instant,
}

impl AccessLog {
    pub fn begin<B>(req: &Request<B>, peer_addr: SocketAddr) -> Self {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            req.uri().path().to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = format!("{:?}", req.version())
            .trim_start_matches("HTTP/")
            .to_string();
        entry.referer = header_value(req, "referer");
        entry.user_agent = header_value(req, "user-agent");

        Self {
            entry,
            started: Instant::now(),
        }
    }

    /// Fill in the response side and write the line
    pub fn finish(self, response: &Response<Full<Bytes>>, format: &str) {
        let entry = self.complete(response);
        logger::log_access(&entry, format);
    }

    fn complete(mut self, response: &Response<Full<Bytes>>) -> AccessLogEntry {
        self.entry.status = response.status().as_u16();
        self.entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        self.entry.request_time_us =
            u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.entry
    }
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
