//! Panic recovery boundary
//!
//! Converts a panic in routing or a handler into a 500 response instead of
//! tearing down the connection task.

use futures::FutureExt;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use crate::http;
use crate::logger;

/// Run `handler`, answering 500 if it panics
pub async fn recover<F>(method: &str, path: &str, handler: F) -> Response<Full<Bytes>>
where
    F: Future<Output = Response<Full<Bytes>>>,
{
    match AssertUnwindSafe(handler).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            logger::log_panic(method, path, &panic_message(payload.as_ref()));
            http::build_500_response()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
