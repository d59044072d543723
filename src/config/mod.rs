// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HealthConfig, LoggingConfig, MessagesConfig, PerformanceConfig, ProxyConfig,
    ServerConfig,
};

impl Config {
    /// Load configuration from the default location ("config.toml" next to the
    /// binary, overridable via `VIEWSRC_*` environment variables)
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("VIEWSRC").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("proxy.path", "/api/proxy")?
            .set_default("proxy.user_agent", "Mozilla/5.0 (compatible; ViewSourceBot/1.0)")?
            .set_default(
                "proxy.accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Config {
        Config::load_from("no-such-config-file").expect("defaults should deserialize")
    }

    #[test]
    fn test_default_server_address() {
        let cfg = defaults();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_default_proxy_settings() {
        let cfg = defaults();
        assert_eq!(cfg.proxy.path, "/api/proxy");
        assert!(cfg.proxy.accept.starts_with("text/html,"));
        assert!(cfg.proxy.request_timeout.is_none());
        assert!(cfg.proxy.max_response_size.is_none());
    }

    #[test]
    fn test_default_messages() {
        let cfg = defaults();
        assert_eq!(cfg.proxy.messages.missing_url, "Missing URL parameter ?url=");
        assert_eq!(cfg.proxy.messages.internal, "Internal Serverless Proxy Error");
        assert!(cfg.proxy.messages.upstream_failure.contains("{status}"));
    }

    #[test]
    fn test_default_health_paths() {
        let cfg = defaults();
        assert!(cfg.proxy.health.enabled);
        assert_eq!(cfg.proxy.health.liveness_path, "/healthz");
        assert_eq!(cfg.proxy.health.readiness_path, "/readyz");
    }
}
