use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use url::Url;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the dashboard service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub source: SourceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let api_base = SourceConfig::parse_base(
            &env::var("SPEND_WATCH_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        )?;
        let provider_limit = match env::var("SPEND_WATCH_PROVIDER_LIMIT") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidProviderLimit(raw))?,
            ),
            Err(_) => None,
        };
        let request_timeout = match env::var("SPEND_WATCH_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            )),
            Err(_) => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            source: SourceConfig {
                api_base,
                provider_limit,
                request_timeout,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the dashboard retrieves its data from.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub api_base: Url,
    /// Sent as `?limit=` on the flagged provider request when set.
    pub provider_limit: Option<u32>,
    pub request_timeout: Option<Duration>,
}

impl SourceConfig {
    pub fn parse_base(raw: &str) -> Result<Url, ConfigError> {
        let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidApiBase {
            value: raw.to_string(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::ApiBaseNotHierarchical(raw.to_string()));
        }
        Ok(url)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidApiBase {
        value: String,
        source: url::ParseError,
    },
    ApiBaseNotHierarchical(String),
    InvalidProviderLimit(String),
    InvalidTimeout(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidApiBase { value, .. } => {
                write!(f, "SPEND_WATCH_API_BASE '{value}' is not a valid URL")
            }
            ConfigError::ApiBaseNotHierarchical(value) => {
                write!(f, "SPEND_WATCH_API_BASE '{value}' cannot be used as a base URL")
            }
            ConfigError::InvalidProviderLimit(value) => {
                write!(f, "SPEND_WATCH_PROVIDER_LIMIT '{value}' must be a non-negative integer")
            }
            ConfigError::InvalidTimeout(value) => write!(
                f,
                "SPEND_WATCH_REQUEST_TIMEOUT_SECS '{value}' must be a whole number of seconds"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidApiBase { source, .. } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::ApiBaseNotHierarchical(_)
            | ConfigError::InvalidProviderLimit(_)
            | ConfigError::InvalidTimeout(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("SPEND_WATCH_API_BASE");
        env::remove_var("SPEND_WATCH_PROVIDER_LIMIT");
        env::remove_var("SPEND_WATCH_REQUEST_TIMEOUT_SECS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.source.api_base.as_str(), "http://127.0.0.1:8000/");
        assert!(config.source.provider_limit.is_none());
        assert!(config.source.request_timeout.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_source_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("SPEND_WATCH_API_BASE", "https://watch.example.org/backend/");
        env::set_var("SPEND_WATCH_PROVIDER_LIMIT", "50");
        env::set_var("SPEND_WATCH_REQUEST_TIMEOUT_SECS", "15");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(
            config.source.api_base.as_str(),
            "https://watch.example.org/backend/"
        );
        assert_eq!(config.source.provider_limit, Some(50));
        assert_eq!(config.source.request_timeout, Some(Duration::from_secs(15)));
        reset_env();
    }

    #[test]
    fn rejects_malformed_provider_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SPEND_WATCH_PROVIDER_LIMIT", "twenty");
        let err = AppConfig::load().expect_err("limit must be numeric");
        assert!(matches!(err, ConfigError::InvalidProviderLimit(ref raw) if raw == "twenty"));
        reset_env();
    }

    #[test]
    fn rejects_non_hierarchical_api_base() {
        let err = SourceConfig::parse_base("mailto:ops@example.org").expect_err("not a base");
        assert!(matches!(err, ConfigError::ApiBaseNotHierarchical(_)));
    }
}
