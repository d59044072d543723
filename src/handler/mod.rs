//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: dispatches health probes and the
//! relay endpoint, then emits one access log entry per request. The inbound
//! body is never read, so the handler is generic over the body type.

mod relay;

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Every invocation is independent: validation and the outbound fetch run
/// sequentially within it, and no state survives past the response.
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = route_request(&path, query.as_deref(), &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method, path);
        entry.target = relay::target_from_query(query.as_deref());
        entry.query = query;
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.user_agent = user_agent;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path and configuration
///
/// Any method that reaches the relay path is accepted; the outbound fetch is
/// always a GET.
async fn route_request(
    path: &str,
    query: Option<&str>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let proxy = &state.config.proxy;

    // Health check endpoints (highest priority, always fast)
    if proxy.health.enabled
        && (path == proxy.health.liveness_path || path == proxy.health.readiness_path)
    {
        return http::build_health_response("ok");
    }

    if path == proxy.path {
        return relay::relay(query, state).await;
    }

    http::build_404_response()
}
