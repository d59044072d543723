// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub proxy: ProxyConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Relay configuration
///
/// Controls the single relay endpoint: where it is mounted, how the outbound
/// fetch identifies itself, and the optional guards around the upstream
/// response.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProxyConfig {
    /// Path the relay endpoint is mounted at
    pub path: String,
    /// User-Agent sent with every outbound fetch
    pub user_agent: String,
    /// Accept header sent with every outbound fetch
    pub accept: String,
    /// Outbound request timeout in seconds (no timeout if not set)
    #[serde(default)]
    pub request_timeout: Option<u64>,
    /// Maximum upstream response size in bytes (unbounded if not set)
    #[serde(default)]
    pub max_response_size: Option<u64>,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
    /// Error message wording
    #[serde(default)]
    pub messages: MessagesConfig,
}

/// Health check configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

/// Error message templates for the relay endpoint
///
/// The `upstream_failure` template supports `{url}`, `{status}` and `{reason}`
/// placeholders.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MessagesConfig {
    #[serde(default = "default_missing_url")]
    pub missing_url: String,
    #[serde(default = "default_invalid_scheme")]
    pub invalid_scheme: String,
    #[serde(default = "default_upstream_failure")]
    pub upstream_failure: String,
    #[serde(default = "default_internal")]
    pub internal: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_missing_url() -> String {
    "Missing URL parameter ?url=".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_invalid_scheme() -> String {
    "Invalid URL scheme. Use http or https only.".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_upstream_failure() -> String {
    "Failed to fetch {url} ({status} {reason})".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_internal() -> String {
    "Internal Serverless Proxy Error".to_string()
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            missing_url: default_missing_url(),
            invalid_scheme: default_invalid_scheme(),
            upstream_failure: default_upstream_failure(),
            internal: default_internal(),
        }
    }
}
