//! Relay error taxonomy
//!
//! Every failure of a relay invocation is terminal and maps to exactly one
//! HTTP status and one JSON body. Wording comes from the configurable
//! message templates so deployments can adjust it without code changes.

use crate::config::MessagesConfig;
use hyper::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Failure modes of a single relay invocation
#[derive(Debug, Error)]
pub enum RelayError {
    /// Required `url` query parameter absent or empty
    #[error("missing url query parameter")]
    MissingParameter,

    /// Target present but not http:// or https:// prefixed
    #[error("target url is not http or https")]
    InvalidScheme,

    /// Upstream reachable but replied with a non-success status
    #[error("upstream {url} returned {status}")]
    UpstreamFailure { url: String, status: StatusCode },

    /// Upstream body exceeded the configured size limit
    #[error("upstream {url} response exceeded {limit} bytes")]
    ResponseTooLarge { url: String, limit: u64 },

    /// Anything else: DNS failure, connection refused, timeout, malformed
    /// response
    #[error(transparent)]
    Fetch(#[from] reqwest::Error),
}

impl RelayError {
    /// HTTP status surfaced to the caller
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter | Self::InvalidScheme => StatusCode::BAD_REQUEST,
            Self::UpstreamFailure { status, .. } => *status,
            Self::ResponseTooLarge { .. } => StatusCode::BAD_GATEWAY,
            Self::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body surfaced to the caller
    pub fn body(&self, messages: &MessagesConfig) -> serde_json::Value {
        match self {
            Self::MissingParameter => json!({ "error": messages.missing_url }),
            Self::InvalidScheme => json!({ "error": messages.invalid_scheme }),
            Self::UpstreamFailure { url, status } => json!({
                "error": render_upstream_message(&messages.upstream_failure, url, *status),
            }),
            Self::ResponseTooLarge { url, limit } => json!({
                "error": format!("Upstream response from {url} exceeded {limit} bytes"),
            }),
            Self::Fetch(e) => json!({
                "error": messages.internal,
                "details": e.to_string(),
            }),
        }
    }
}

/// Substitute `{url}`, `{status}` and `{reason}` in the upstream failure
/// template
fn render_upstream_message(template: &str, url: &str, status: StatusCode) -> String {
    template
        .replace("{url}", url)
        .replace("{status}", status.as_str())
        .replace("{reason}", status.canonical_reason().unwrap_or("Unknown"))
}
