// Application state module
// Immutable per-process state shared across handler invocations

use super::types::Config;
use crate::client;

/// Application state
///
/// Built once at startup and shared via `Arc`. Invocations hold no mutable
/// state of their own, so no locks are taken on the request path.
pub struct AppState {
    pub config: Config,
    /// Outbound HTTP client, reused across invocations for connection pooling
    pub client: reqwest::Client,
}

impl AppState {
    /// Create `AppState` from loaded configuration
    ///
    /// Fails if the outbound client cannot be constructed (e.g. TLS backend
    /// initialization failure).
    pub fn new(config: Config) -> reqwest::Result<Self> {
        let client = client::build(&config.proxy)?;
        Ok(Self { config, client })
    }
}
