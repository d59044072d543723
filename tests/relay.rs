//! End-to-end relay handler tests against a raw-TCP mock upstream
//!
//! The mock counts accepted connections so the no-outbound-call guarantees of
//! the validation path can be asserted directly.

use http_body_util::BodyExt;
use hyper::body::Bytes;
use hyper::{HeaderMap, Request, StatusCode};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use viewsrc::config::{AppState, Config};
use viewsrc::handler;

/// Minimal upstream that answers every connection with one canned response
struct MockUpstream {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockUpstream {
    async fn start(raw_response: String) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream addr");
        let hits = Arc::new(AtomicUsize::new(0));

        let hits_counter = Arc::clone(&hits);
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                hits_counter.fetch_add(1, Ordering::SeqCst);
                let response = raw_response.clone();
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = stream.read(&mut buf).await;
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { addr, hits }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn raw_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn test_state() -> Arc<AppState> {
    let mut cfg = Config::load_from("no-such-config-file").expect("default config");
    cfg.logging.access_log = false;
    Arc::new(AppState::new(cfg).expect("build state"))
}

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

async fn send(state: &Arc<AppState>, path_and_query: &str) -> (StatusCode, HeaderMap, Bytes) {
    let req = Request::builder()
        .method("GET")
        .uri(path_and_query)
        .header("user-agent", "test-client/1.0")
        .body(())
        .unwrap();

    let response = handler::handle_request(req, peer(), Arc::clone(state))
        .await
        .unwrap();
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    (parts.status, parts.headers, bytes)
}

fn error_field(body: &Bytes) -> String {
    let value: serde_json::Value = serde_json::from_slice(body).expect("error body is JSON");
    value["error"].as_str().expect("error field").to_string()
}

#[tokio::test]
async fn missing_url_parameter_is_rejected() {
    let state = test_state();

    for path in ["/api/proxy", "/api/proxy?foo=bar", "/api/proxy?url="] {
        let (status, _, body) = send(&state, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "for {path}");
        assert_eq!(error_field(&body), "Missing URL parameter ?url=");
    }
}

#[tokio::test]
async fn non_http_schemes_are_rejected_without_fetch() {
    let state = test_state();
    let upstream = MockUpstream::start(raw_response("200 OK", "unreachable")).await;

    // A scheme-less address pointing straight at the mock: if validation were
    // skipped, the fetch would register a hit.
    let schemeless = format!("/api/proxy?url={}/page", upstream.addr);
    let targets = [
        "/api/proxy?url=ftp://example.com".to_string(),
        "/api/proxy?url=javascript:alert(1)".to_string(),
        "/api/proxy?url=example.com".to_string(),
        schemeless,
    ];

    for path in &targets {
        let (status, _, body) = send(&state, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "for {path}");
        assert_eq!(error_field(&body), "Invalid URL scheme. Use http or https only.");
    }

    assert_eq!(upstream.hit_count(), 0, "no outbound call may be made");
}

#[tokio::test]
async fn upstream_error_status_is_passed_through() {
    let state = test_state();
    let upstream = MockUpstream::start(raw_response("404 Not Found", "gone")).await;

    let target = upstream.url("/missing");
    let (status, _, body) = send(&state, &format!("/api/proxy?url={target}")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let message = error_field(&body);
    assert!(message.contains(&target), "message names the target: {message}");
    assert!(message.contains("404"), "message names the status: {message}");
}

#[tokio::test]
async fn successful_fetch_relays_body_verbatim() {
    let state = test_state();
    let upstream = MockUpstream::start(raw_response("200 OK", "<html>hi</html>")).await;

    let (status, headers, body) =
        send(&state, &format!("/api/proxy?url={}", upstream.url("/"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(&body[..], b"<html>hi</html>");
    assert_eq!(upstream.hit_count(), 1);
}

#[tokio::test]
async fn unreachable_upstream_returns_internal_error() {
    let state = test_state();

    // Bind then immediately drop a listener so the port is known-closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, _, body) = send(&state, &format!("/api/proxy?url=http://{dead_addr}/")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["error"], "Internal Serverless Proxy Error");
    assert!(
        !value["details"].as_str().unwrap_or("").is_empty(),
        "details must describe the underlying failure"
    );
}

#[tokio::test]
async fn repeated_requests_are_idempotent() {
    let state = test_state();
    let upstream = MockUpstream::start(raw_response("200 OK", "<p>steady</p>")).await;
    let path = format!("/api/proxy?url={}", upstream.url("/"));

    let (first_status, _, first_body) = send(&state, &path).await;
    let (second_status, _, second_body) = send(&state, &path).await;

    assert_eq!(first_status, second_status);
    assert_eq!(first_body, second_body);
    assert_eq!(upstream.hit_count(), 2);
}

#[tokio::test]
async fn oversized_response_is_refused_when_limit_set() {
    let mut cfg = Config::load_from("no-such-config-file").expect("default config");
    cfg.logging.access_log = false;
    cfg.proxy.max_response_size = Some(8);
    let state = Arc::new(AppState::new(cfg).expect("build state"));

    let upstream = MockUpstream::start(raw_response("200 OK", "<html>too big</html>")).await;

    let (status, _, body) =
        send(&state, &format!("/api/proxy?url={}", upstream.url("/"))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(error_field(&body).contains("exceeded 8 bytes"));
}

#[tokio::test]
async fn health_probes_respond() {
    let state = test_state();

    for path in ["/healthz", "/readyz"] {
        let (status, headers, body) = send(&state, path).await;
        assert_eq!(status, StatusCode::OK, "for {path}");
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
    }
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let state = test_state();

    let (status, _, body) = send(&state, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_field(&body), "Not Found");
}
