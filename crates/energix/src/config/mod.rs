//! Environment-driven configuration.
//!
//! Settings come from process environment variables, with `.env` file
//! support through dotenvy: `APP_ENV`, `APP_HOST`, `APP_PORT`,
//! `APP_LOG_LEVEL`. Loading is separated from the environment lookup so
//! tests can feed values without mutating process state.

use std::env;
use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a number between 0 and 65535, got '{value}'")]
    InvalidPort { value: String },
    #[error("APP_HOST '{value}' is neither 'localhost' nor an IP address")]
    InvalidHost {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Deployment stage, from `APP_ENV`. Unrecognized values fall back to
/// development.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the service binaries need at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = get("APP_ENV")
            .map(|raw| AppEnvironment::parse(&raw))
            .unwrap_or_default();

        let host = get("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        // 8080 matches the base URL the dashboard front-end is configured
        // with (http://localhost:8080/api).
        let port = match get("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            None => 8080,
        };

        let log_level = get("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Bind address for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolve the configured host and port. "localhost" maps to loopback
    /// without a DNS round-trip; anything else must be a literal IP.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host.parse().map_err(|source| ConfigError::InvalidHost {
                value: self.host.clone(),
                source,
            })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log-level knob consumed by [`crate::telemetry::init`].
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_lookup(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(empty_lookup).expect("defaults load");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_overrides_from_the_lookup() {
        let config = AppConfig::from_lookup(|key| match key {
            "APP_ENV" => Some("Production".to_string()),
            "APP_HOST" => Some("0.0.0.0".to_string()),
            "APP_PORT" => Some("9090".to_string()),
            "APP_LOG_LEVEL" => Some("debug".to_string()),
            _ => None,
        })
        .expect("overrides load");

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn unknown_environment_falls_back_to_development() {
        assert_eq!(AppEnvironment::parse("staging"), AppEnvironment::Development);
        assert_eq!(AppEnvironment::parse(" CI "), AppEnvironment::Test);
        assert_eq!(AppEnvironment::parse("prod"), AppEnvironment::Production);
    }

    #[test]
    fn bad_port_is_rejected_with_the_offending_value() {
        let err = AppConfig::from_lookup(|key| match key {
            "APP_PORT" => Some("eighty-eighty".to_string()),
            _ => None,
        })
        .expect_err("non-numeric port rejected");
        assert!(matches!(err, ConfigError::InvalidPort { value } if value == "eighty-eighty"));
    }

    #[test]
    fn localhost_resolves_to_loopback() {
        let server = ServerConfig {
            host: "LocalHost".to_string(),
            port: 8080,
        };
        let addr = server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080));
    }

    #[test]
    fn non_ip_host_is_rejected() {
        let server = ServerConfig {
            host: "energix.internal".to_string(),
            port: 8080,
        };
        let err = server.socket_addr().expect_err("hostname rejected");
        assert!(matches!(err, ConfigError::InvalidHost { value, .. } if value == "energix.internal"));
    }
}
