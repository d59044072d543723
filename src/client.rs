//! Outbound HTTP client construction
//!
//! One `reqwest::Client` is built at startup and shared for the lifetime of
//! the process. Redirect handling stays on the client default (followed
//! transparently); a request timeout is only applied when configured.

use crate::config::ProxyConfig;
use std::time::Duration;

/// Build the outbound client from relay configuration
pub fn build(cfg: &ProxyConfig) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(cfg.user_agent.clone());

    if let Some(secs) = cfg.request_timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}
