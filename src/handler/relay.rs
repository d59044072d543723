//! Relay core
//!
//! Validates the caller-supplied target URL, performs one non-retried GET
//! against it, and relays the upstream body verbatim. Every failure is
//! terminal for the invocation and surfaced as a structured JSON error.

use crate::config::AppState;
use crate::error::RelayError;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Handle one relay invocation: Start → Validate → Fetch → Relay | Error
pub async fn relay(query: Option<&str>, state: &AppState) -> Response<Full<Bytes>> {
    match fetch_target(query, state).await {
        Ok(body) => http::build_relay_response(body),
        Err(err) => {
            logger::log_relay_error(&err);
            http::build_json_response(err.status(), &err.body(&state.config.proxy.messages))
        }
    }
}

/// Validate the query and buffer the upstream body
async fn fetch_target(query: Option<&str>, state: &AppState) -> Result<Bytes, RelayError> {
    let target = target_from_query(query).ok_or(RelayError::MissingParameter)?;

    if !has_http_scheme(&target) {
        return Err(RelayError::InvalidScheme);
    }

    let response = state
        .client
        .get(&target)
        .header("Accept", &state.config.proxy.accept)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RelayError::UpstreamFailure { url: target, status });
    }

    read_body(response, &target, state.config.proxy.max_response_size).await
}

/// Extract the `url` query parameter, percent-decoded
///
/// An empty value counts as missing.
pub(crate) fn target_from_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| *key == "url")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Check for an `http://` or `https://` prefix, case-insensitive on the scheme
fn has_http_scheme(url: &str) -> bool {
    [&b"http://"[..], &b"https://"[..]].iter().any(|scheme| {
        url.as_bytes()
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Buffer the full upstream body, honoring the optional size limit
async fn read_body(
    response: reqwest::Response,
    url: &str,
    limit: Option<u64>,
) -> Result<Bytes, RelayError> {
    let Some(limit) = limit else {
        return Ok(response.bytes().await?);
    };

    let too_large = || RelayError::ResponseTooLarge {
        url: url.to_string(),
        limit,
    };

    // Declared length is checked first so oversized responses can be refused
    // without reading them.
    if response.content_length().is_some_and(|len| len > limit) {
        return Err(too_large());
    }

    let mut response = response;
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if (body.len() + chunk.len()) as u64 > limit {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }

    Ok(Bytes::from(body))
}
