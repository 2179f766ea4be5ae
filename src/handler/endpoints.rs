//! Endpoint handlers
//!
//! Ping, the double-response demo and the JSON create/echo endpoint.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use serde_json::{json, Value};

use super::error::HandlerError;
use super::writer::ResponseWriter;
use crate::http;
use crate::logger;

pub const PING_MESSAGE: &str = "diya nigaa";
pub const CREATED_MESSAGE: &str = "User created successfully";

/// `GET /ping`
pub fn ping() -> Response<Full<Bytes>> {
    http::json_response(StatusCode::OK, &json!({ "message": PING_MESSAGE }))
}

/// `GET /fuck`
///
/// Writes twice on purpose. The second write never reaches the client,
/// it only shows up as a warning in the server log.
pub fn double_response() -> Response<Full<Bytes>> {
    let mut writer = ResponseWriter::new();
    writer.json(StatusCode::OK, &json!({ "hi": "byee" }));
    writer.json(StatusCode::BAD_REQUEST, &json!({ "something wnet": "ein" }));
    writer.finish()
}

/// `POST /post`
///
/// Accepts any JSON value and echoes it back under `data`.
pub async fn create<B>(
    req: Request<B>,
    max_body_size: u64,
) -> Result<Response<Full<Bytes>>, HandlerError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let body = Limited::new(req.into_body(), limit)
        .collect()
        .await
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                HandlerError::PayloadTooLarge {
                    limit: max_body_size,
                }
            } else {
                HandlerError::BodyRead(e.to_string())
            }
        })?
        .to_bytes();

    let user: Value = serde_json::from_slice(&body)?;
    logger::log_payload(&user);

    Ok(http::json_response(
        StatusCode::OK,
        &json!({
            "message": CREATED_MESSAGE,
            "data": user,
        }),
    ))
}
