//! Request routing dispatch module
//!
//! Matches method and path against the route table and dispatches to endpoints.

use crate::config::AppState;
use crate::handler::endpoints;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};

pub const PING_PATH: &str = "/ping";
pub const DOUBLE_RESPONSE_PATH: &str = "/fuck";
pub const CREATE_PATH: &str = "/post";
/// Registered only in test builds, to exercise the recovery boundary
#[cfg(test)]
pub const PANIC_PATH: &str = "/panic";

/// Route request based on method and path
pub async fn route<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match (req.method(), req.uri().path()) {
        (&Method::GET, PING_PATH) => endpoints::ping(),
        (&Method::GET, DOUBLE_RESPONSE_PATH) => endpoints::double_response(),
        #[cfg(test)]
        (&Method::GET, PANIC_PATH) => panic!("route exploded"),
        (&Method::POST, CREATE_PATH) => {
            if let Some(resp) = check_body_size(&req, state.http.max_body_size) {
                return resp;
            }
            endpoints::create(req, state.http.max_body_size)
                .await
                .unwrap_or_else(|e| e.into_response())
        }
        (method, path) => match trailing_slash_redirect(method, path) {
            Some(target) => {
                let status = if *method == Method::GET {
                    StatusCode::MOVED_PERMANENTLY
                } else {
                    StatusCode::TEMPORARY_REDIRECT
                };
                let location = match req.uri().query() {
                    Some(query) => format!("{target}?{query}"),
                    None => target.to_string(),
                };
                http::build_redirect_response(&location, status)
            }
            // Wrong methods land here too, same as unknown paths
            None => http::build_404_response(),
        },
    }
}

/// Whether a handler is registered for this method and path
fn is_route(method: &Method, path: &str) -> bool {
    matches!(
        (method, path),
        (&Method::GET, PING_PATH | DOUBLE_RESPONSE_PATH) | (&Method::POST, CREATE_PATH)
    )
}

/// Route path for `path` minus one trailing slash, if that route exists for `method`
fn trailing_slash_redirect<'a>(method: &Method, path: &'a str) -> Option<&'a str> {
    let trimmed = path.strip_suffix('/')?;
    (!trimmed.is_empty() && is_route(method, trimmed)).then_some(trimmed)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(
                    super::HandlerError::PayloadTooLarge {
                        limit: max_body_size,
                    }
                    .into_response(),
                )
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::{BodyExt, StreamBody};
    use hyper::body::Frame;
    use serde_json::{json, Value};

    fn state() -> AppState {
        AppState::new(&Config::default())
    }

    fn request(method: Method, uri: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from(body.to_owned())))
            .unwrap()
    }

    async fn send(req: Request<Full<Bytes>>, state: &AppState) -> (StatusCode, String) {
        let resp = route(req, state).await;
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_ping() {
        let (status, body) = send(request(Method::GET, "/ping", ""), &state()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"message":"diya nigaa"}"#);
    }

    #[tokio::test]
    async fn test_ping_ignores_query_parameters() {
        let (status, body) = send(request(Method::GET, "/ping?verbose=1", ""), &state()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"message":"diya nigaa"}"#);
    }

    #[tokio::test]
    async fn test_double_response_keeps_first_write_only() {
        let (status, body) = send(request(Method::GET, "/fuck", ""), &state()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"hi":"byee"}"#);
        assert!(!body.contains("ein"));
    }

    #[tokio::test]
    async fn test_create_echoes_object() {
        let (status, body) =
            send(request(Method::POST, "/post", r#"{"name": "a"}"#), &state()).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({"message": "User created successfully", "data": {"name": "a"}})
        );
    }

    #[tokio::test]
    async fn test_create_preserves_key_order() {
        let (status, body) =
            send(request(Method::POST, "/post", r#"{"b": 1, "a": [true, null]}"#), &state()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            r#"{"message":"User created successfully","data":{"b":1,"a":[true,null]}}"#
        );
    }

    #[tokio::test]
    async fn test_create_accepts_scalars() {
        let (status, body) = send(request(Method::POST, "/post", "42"), &state()).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["data"], 42);

        let (status, body) = send(request(Method::POST, "/post", "null"), &state()).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert!(value["data"].is_null());
        assert_eq!(value["message"], "User created successfully");
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_json() {
        let (status, body) = send(request(Method::POST, "/post", "not json"), &state()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_str(&body).unwrap();
        let error = value["error"].as_str().unwrap();
        assert!(!error.is_empty());
        assert!(value.get("data").is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_trailing_data() {
        let (status, body) = send(request(Method::POST, "/post", r#"{"a":1} x"#), &state()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert!(value.get("data").is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_empty_body() {
        let (status, body) = send(request(Method::POST, "/post", ""), &state()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert!(!value["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_oversized_content_length() {
        let mut state = state();
        state.http.max_body_size = 8;
        let mut req = request(Method::POST, "/post", r#"{"name": "too long"}"#);
        req.headers_mut()
            .insert("content-length", "20".parse().unwrap());

        let (status, body) = send(req, &state).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, r#"{"error":"request body exceeds 8 bytes"}"#);
    }

    #[tokio::test]
    async fn test_create_rejects_oversized_stream() {
        let mut state = state();
        state.http.max_body_size = 8;
        let (status, _) =
            send(request(Method::POST, "/post", r#"{"name": "too long"}"#), &state).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (status, body) = send(request(Method::GET, "/nope", ""), &state()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "404 page not found");
    }

    #[tokio::test]
    async fn test_wrong_method_is_404() {
        let (status, body) = send(request(Method::POST, "/ping", ""), &state()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "404 page not found");

        let (status, _) = send(request(Method::HEAD, "/ping", ""), &state()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(request(Method::GET, "/post", ""), &state()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_trailing_slash_redirects_get_permanently() {
        let resp = route(request(Method::GET, "/ping/", ""), &state()).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["location"], "/ping");

        let resp = route(request(Method::GET, "/fuck/?x=1", ""), &state()).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["location"], "/fuck?x=1");
    }

    #[tokio::test]
    async fn test_trailing_slash_redirects_post_temporarily() {
        let resp = route(request(Method::POST, "/post/", "{}"), &state()).await;
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers()["location"], "/post");
    }

    #[tokio::test]
    async fn test_trailing_slash_needs_route_for_method() {
        let (status, _) = send(request(Method::GET, "/post/", ""), &state()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(request(Method::GET, "/", ""), &state()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_reports_broken_body_stream() {
        let frames: Vec<Result<Frame<Bytes>, std::io::Error>> = vec![
            Ok(Frame::data(Bytes::from_static(b"{\"name\":"))),
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "client went away",
            )),
        ];
        let req = Request::builder()
            .method(Method::POST)
            .uri("/post")
            .body(StreamBody::new(futures::stream::iter(frames)))
            .unwrap();

        let resp = route(req, &state()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        let error = value["error"].as_str().unwrap();
        assert!(error.starts_with("failed to read request body:"), "got: {error}");
        assert!(error.contains("client went away"));
    }

    #[tokio::test]
    async fn test_panicking_route_is_caught_by_handle_request() {
        let state = std::sync::Arc::new(state());
        let req = request(Method::GET, PANIC_PATH, "");
        let resp = crate::handler::handle_request(req, "127.0.0.1:40000".parse().unwrap(), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
