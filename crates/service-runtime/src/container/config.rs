//! # Service Configuration
//!
//! Unified configuration for the gateway, the stores and the launch
//! coordinator. Defaults first, then `RF_*` environment overrides.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `RF_HTTP_HOST` | `gateway.http.host` |
//! | `RF_HTTP_PORT` | `gateway.http.port` |
//! | `RF_FEED_CAPACITY` | `store.feed_capacity` |
//! | `RF_LAUNCH_APPEND_ATTEMPTS` | `launch.append_attempts` |
//! | `RF_ENABLE_STATE_RESET` | `gateway.admin.enable_state_reset` |
//! | `RF_API_KEYS` | `gateway.auth.credentials` as `key=role1+role2,key2=role3` |

use rf_03_launch_control::{LaunchConfig, LaunchConfigError};
use rf_04_api_gateway::{Credential, GatewayConfig};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Complete service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// API gateway configuration.
    pub gateway: GatewayConfig,
    /// Store configuration.
    pub store: StoreConfig,
    /// Launch coordinator configuration.
    pub launch: LaunchConfig,
}

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Change feed buffer per store. A subscriber further behind is
    /// disconnected.
    pub feed_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            feed_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment override could not be parsed.
    #[error("invalid value '{value}' for {variable}: {reason}")]
    InvalidOverride {
        variable: &'static str,
        value: String,
        reason: String,
    },

    /// The change feed needs room for at least one event.
    #[error("store.feed_capacity must be at least 1")]
    ZeroFeedCapacity,

    #[error(transparent)]
    Gateway(#[from] rf_04_api_gateway::ConfigError),

    #[error(transparent)]
    Launch(#[from] LaunchConfigError),
}

impl ServiceConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value when set.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("RF_HTTP_HOST") {
            self.gateway.http.host = parse("RF_HTTP_HOST", host)?;
        }
        if let Some(port) = lookup("RF_HTTP_PORT") {
            self.gateway.http.port = parse("RF_HTTP_PORT", port)?;
        }
        if let Some(capacity) = lookup("RF_FEED_CAPACITY") {
            self.store.feed_capacity = parse("RF_FEED_CAPACITY", capacity)?;
        }
        if let Some(attempts) = lookup("RF_LAUNCH_APPEND_ATTEMPTS") {
            self.launch.append_attempts = parse("RF_LAUNCH_APPEND_ATTEMPTS", attempts)?;
        }
        if let Some(enabled) = lookup("RF_ENABLE_STATE_RESET") {
            self.gateway.admin.enable_state_reset = parse("RF_ENABLE_STATE_RESET", enabled)?;
        }
        if let Some(keys) = lookup("RF_API_KEYS") {
            self.gateway.auth.credentials = parse_api_keys(&keys)?;
        }
        Ok(())
    }

    /// Rejects settings the services cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.feed_capacity == 0 {
            return Err(ConfigError::ZeroFeedCapacity);
        }
        self.launch.validate()?;
        self.gateway.validate()?;
        Ok(())
    }
}

fn parse<T>(variable: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidOverride {
            variable,
            reason: e.to_string(),
            value,
        })
}

/// Parses `key=role1+role2,key2=role3`. A key without `=` has no roles.
fn parse_api_keys(raw: &str) -> Result<Vec<Credential>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (key, roles) = entry.split_once('=').unwrap_or((entry, ""));
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::InvalidOverride {
                    variable: "RF_API_KEYS",
                    value: "<redacted>".into(),
                    reason: "empty API key".into(),
                });
            }
            Ok(Credential {
                key: key.to_string(),
                roles: roles
                    .split('+')
                    .map(str::trim)
                    .filter(|role| !role.is_empty())
                    .map(String::from)
                    .collect(),
            })
        })
        .collect()
}
