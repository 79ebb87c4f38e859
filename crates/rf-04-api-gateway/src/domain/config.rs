//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Role required to launch rockets.
pub const LAUNCH_ROLE: &str = "rockets_launch";

/// Role required for administrative routes.
pub const ADMIN_ROLE: &str = "admin";

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Request validation limits
    pub limits: LimitsConfig,
    /// Server-sent event streams
    pub feed: FeedConfig,
    /// API key authentication
    pub auth: AuthConfig,
    /// Administrative routes
    pub admin: AdminConfig,
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_request_size_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size_bytes cannot be 0".into(),
            ));
        }

        if self.limits.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout_secs cannot be 0".into(),
            ));
        }

        if self.feed.keep_alive_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "keep_alive_secs cannot be 0".into(),
            ));
        }

        let mut keys = HashSet::new();
        for credential in &self.auth.credentials {
            if credential.key.trim().is_empty() {
                return Err(ConfigError::InvalidCredential(
                    "API key cannot be empty".into(),
                ));
            }
            if !keys.insert(credential.key.as_str()) {
                return Err(ConfigError::InvalidCredential(
                    "API key configured more than once".into(),
                ));
            }
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8080)
    pub port: u16,
    /// Enable HTTP server
    pub enabled: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            enabled: true,
        }
    }
}

/// Request validation limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes
    pub max_request_size_bytes: usize,
    /// Time allowed to produce a response (streams excluded once started)
    pub request_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size_bytes: 1024 * 1024,
            request_timeout_secs: 30,
        }
    }
}

impl LimitsConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Server-sent event stream configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Interval between keep-alive comments on idle streams
    pub keep_alive_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { keep_alive_secs: 15 }
    }
}

impl FeedConfig {
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }
}

/// API key authentication. No credentials disables authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub credentials: Vec<Credential>,
}

impl AuthConfig {
    pub fn is_enabled(&self) -> bool {
        !self.credentials.is_empty()
    }
}

/// One API key and the roles it grants.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub key: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Credential {
    pub fn new(key: impl Into<String>, roles: &[&str]) -> Self {
        Self {
            key: key.into(),
            roles: roles.iter().map(|role| (*role).to_string()).collect(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|granted| granted == role)
    }
}

// Keys never end up in logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// Administrative route configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Route `DELETE /admin/state`, which wipes every rocket and launch record
    pub enable_state_reset: bool,
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Invalid API key configuration
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
}
