use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_HANDLER_TIMEOUT_SECS: u64 = 1;
pub const MAX_HANDLER_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_HANDLER_TIMEOUT_SECS: u64 = 10;

/// Per-request deadline. A request still running at the deadline is dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    pub timeout_secs: u64,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HANDLER_TIMEOUT_SECS,
        }
    }
}

impl HandlerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_HANDLER_TIMEOUT_SECS..=MAX_HANDLER_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::config(format!(
                "handler.timeout_secs must be {}-{}, got {}",
                MIN_HANDLER_TIMEOUT_SECS, MAX_HANDLER_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
