//! Launch coordinator configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of attempts to append a launch record.
pub const DEFAULT_APPEND_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// How many times the audit append is tried, each with a fresh id,
    /// before the launch reports failure. The rocket stays `LAUNCHED` either way.
    pub append_attempts: u32,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            append_attempts: DEFAULT_APPEND_ATTEMPTS,
        }
    }
}

/// Invalid launch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchConfigError {
    #[error("launch.append_attempts must be at least 1")]
    NoAppendAttempts,
}

impl LaunchConfig {
    pub fn validate(&self) -> Result<(), LaunchConfigError> {
        if self.append_attempts == 0 {
            return Err(LaunchConfigError::NoAppendAttempts);
        }
        Ok(())
    }
}
