//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults. Configuration is loaded once at startup and never mutated.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default dev.to API root.
pub const DEFAULT_BACKEND_URL: &str = "https://dev.to/api/";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Deployment environment label (e.g. "development", "production").
    pub environment: String,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// dev.to backend configuration.
    pub backend: BackendConfig,

    /// HTTP session lifecycle configuration.
    pub sessions: SessionConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// One-line description served on discovery requests.
    pub description: String,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, colored output.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

/// Configuration for the dev.to REST backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// API root, e.g. `https://dev.to/api/`.
    pub base_url: String,

    /// User-Agent sent with every backend request.
    pub user_agent: String,
}

/// Session registry limits for the HTTP transport.
///
/// Both limits are off by default: sessions then live as long as the process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Evict sessions idle for longer than this many seconds.
    pub idle_timeout_secs: Option<u64>,

    /// Refuse new sessions beyond this count.
    pub max_sessions: Option<usize>,
}

impl SessionConfig {
    /// Idle timeout as a `Duration`.
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Load logging settings from `MCP_LOG_LEVEL`, `MCP_LOG_FORMAT` and
    /// `MCP_ENVIRONMENT`.
    ///
    /// Reads nothing else, so the subscriber can be installed before the
    /// rest of the configuration is loaded and its warnings are not lost.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }

        let development = std::env::var("MCP_ENVIRONMENT")
            .map(|env| env.eq_ignore_ascii_case("development"))
            .unwrap_or(true);

        // Pretty logs for local work, JSON lines everywhere else
        logging.format = match std::env::var("MCP_LOG_FORMAT")
            .map(|v| v.to_lowercase())
            .as_deref()
        {
            Ok("json") => LogFormat::Json,
            Ok("pretty") => LogFormat::Pretty,
            _ if development => LogFormat::Pretty,
            _ => LogFormat::Json,
        };

        logging
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "dev-to-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "MCP server for dev.to public API".to_string(),
            },
            environment: "development".to_string(),
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            backend: BackendConfig::default(),
            sessions: SessionConfig::default(),
        }
    }
}

impl Config {
    /// Whether the server runs in the development environment.
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(environment) = std::env::var("MCP_ENVIRONMENT") {
            config.environment = environment;
        }

        config.logging = LoggingConfig::from_env();

        if let Ok(base_url) = std::env::var("MCP_DEVTO_BASE_URL") {
            info!("dev.to API base URL overridden: {}", base_url);
            config.backend.base_url = base_url;
        }

        config.sessions.idle_timeout_secs = parse_env("MCP_SESSION_IDLE_TIMEOUT_SECS");
        config.sessions.max_sessions = parse_env("MCP_MAX_SESSIONS");

        if config.sessions.idle_timeout_secs.is_none() && config.sessions.max_sessions.is_none() {
            warn!(
                "No session idle timeout or session cap configured - \
                 HTTP sessions are kept until the process exits"
            );
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}

/// Parse an optional environment variable, warning when it is set but invalid.
pub(crate) fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", name, raw);
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    pub(crate) static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MCP_SERVER_NAME",
        "MCP_ENVIRONMENT",
        "MCP_LOG_LEVEL",
        "MCP_LOG_FORMAT",
        "MCP_DEVTO_BASE_URL",
        "MCP_SESSION_IDLE_TIMEOUT_SECS",
        "MCP_MAX_SESSIONS",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.name, "dev-to-mcp");
        assert_eq!(config.server.description, "MCP server for dev.to public API");
        assert_eq!(config.backend.base_url, "https://dev.to/api/");
        assert!(config.sessions.idle_timeout().is_none());
        assert!(config.sessions.max_sessions.is_none());
        assert!(config.is_development());
    }

    #[test]
    fn test_overrides_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "devto-test");
            std::env::set_var("MCP_DEVTO_BASE_URL", "http://localhost:4000/api");
            std::env::set_var("MCP_SESSION_IDLE_TIMEOUT_SECS", "900");
            std::env::set_var("MCP_MAX_SESSIONS", "64");
        }

        let config = Config::from_env();
        assert_eq!(config.server.name, "devto-test");
        assert_eq!(config.backend.base_url, "http://localhost:4000/api");
        assert_eq!(config.sessions.idle_timeout(), Some(Duration::from_secs(900)));
        assert_eq!(config.sessions.max_sessions, Some(64));

        clear_env();
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        unsafe {
            std::env::set_var("MCP_SESSION_IDLE_TIMEOUT_SECS", "soon");
            std::env::set_var("MCP_MAX_SESSIONS", "-3");
        }

        let config = Config::from_env();
        assert!(config.sessions.idle_timeout_secs.is_none());
        assert!(config.sessions.max_sessions.is_none());

        clear_env();
    }

    #[test]
    fn test_log_format_follows_environment() {
        let _lock = ENV_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        unsafe {
            std::env::set_var("MCP_ENVIRONMENT", "production");
        }
        assert_eq!(Config::from_env().logging.format, LogFormat::Json);

        unsafe {
            std::env::set_var("MCP_LOG_FORMAT", "pretty");
        }
        assert_eq!(Config::from_env().logging.format, LogFormat::Pretty);

        clear_env();
    }

    #[test]
    fn test_logging_loads_without_full_config() {
        let _lock = ENV_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let logging = LoggingConfig::from_env();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Pretty);

        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
            std::env::set_var("MCP_ENVIRONMENT", "staging");
            std::env::set_var("MCP_MAX_SESSIONS", "many");
        }
        let logging = LoggingConfig::from_env();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);

        clear_env();
    }
}
