//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines constants for
//! the served paths, HTTP cache headers, and default settings. `AppConfig` is
//! the root configuration struct; every field has a default so the service
//! can run with no config file at all.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Served Paths
// =============================================================================

/// Path of the generated banner script.
pub const DEPLOYMENT_BAR_PATH: &str = "/js/deployment-bar.js";

/// Path probed by the load balancer (HEAD only).
pub const HEALTH_PATH: &str = "/health";

/// Path that marks this instance unavailable to the load balancer.
pub const HEALTH_DISABLE_PATH: &str = "/health/disable";

/// Path that marks this instance available again.
pub const HEALTH_ENABLE_PATH: &str = "/health/enable";

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// The banner script must never be served stale: a browser that cached it
// across a zone switch would keep showing the old zone. max-age=0 plus
// no-cache forces revalidation on every use, and the Expires header pins a
// date in the past for HTTP/1.0 caches.

/// Max-age for the banner script. Zero: always revalidate.
pub const HTTP_CACHE_BAR_MAX_AGE: u32 = 0;

/// Pre-formatted Cache-Control header value for the banner script.
pub const CACHE_CONTROL_BAR: &str =
    formatcp!("public, max-age={}, no-cache", HTTP_CACHE_BAR_MAX_AGE);

/// Expires header value: a date long past, defeating HTTP/1.0 caches.
pub const EXPIRES_BAR: &str = "Sat, 26 Jul 1997 00:00:00 GMT";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default zone marker file consulted once at startup
pub const DEFAULT_MARKER_FILE: &str = "/usr/local/lib/cs/current_zone";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "zonebar=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Name of the session-continuity marker cookie set by the banner endpoint
pub const SESSION_COOKIE: &str = "zonebar-session";

/// Version of this build, stamped by cargo at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Deployment zone settings
    #[serde(default)]
    pub deployment: DeploymentConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }
}

/// Deployment zone settings.
///
/// `zone` names the blue/green slot this process is deployed to. Leaving it
/// unset is tolerated (the banner endpoint reports the misconfiguration to
/// the browser) but every real deployment should set it, either here or via
/// the `--zone` flag.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentConfig {
    /// Deployment zone of this process (blue or green)
    pub zone: Option<String>,
    /// Marker file whose first line names the currently active zone,
    /// read once at startup to seed the availability flag
    #[serde(default = "DeploymentConfig::default_marker_file")]
    pub marker_file: String,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            zone: None,
            marker_file: Self::default_marker_file(),
        }
    }
}

impl DeploymentConfig {
    fn default_marker_file() -> String {
        DEFAULT_MARKER_FILE.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error: the built-in defaults apply, matching
    /// a bare deployment that only passes `--zone`. A file that exists but
    /// fails to parse is a startup error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
