//! HTTP response building module
//!
//! All builders fall back to a bare response instead of panicking when header
//! assembly fails.

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Build the 200 relay response carrying the upstream body verbatim
///
/// The body is relayed without transformation or re-encoding; the permissive
/// CORS header lets browser front-ends consume the endpoint directly.
pub fn build_relay_response(body: Bytes) -> Response<Full<Bytes>> {
    let content_length = body.len();

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Access-Control-Allow-Origin", "*")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("relay", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a JSON response with the given status
pub fn build_json_response(status: StatusCode, body: &serde_json::Value) -> Response<Full<Bytes>> {
    let json = body.to_string();

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", json.len())
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("json", &e);
            Response::new(Full::new(Bytes::from(r#"{"error":"Internal error"}"#)))
        })
}

/// Build a health probe response
pub fn build_health_response(status_text: &str) -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::OK,
        &serde_json::json!({ "status": status_text }),
    )
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({ "error": "Not Found" }),
    )
}

/// Log response build error
fn log_build_error(kind: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {kind} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_response_headers() {
        let resp = build_relay_response(Bytes::from("<html>hi</html>"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "15");
    }

    #[test]
    fn test_json_response_content_type() {
        let resp = build_json_response(
            StatusCode::BAD_REQUEST,
            &serde_json::json!({ "error": "nope" }),
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_404_is_json() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }
}
