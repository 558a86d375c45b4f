use std::time::Duration;

use serde::Deserialize;

use crate::constants::DEFAULT_AWAIT_POLL_INTERVAL_MS;
use crate::constants::DEFAULT_AWAIT_TIMEOUT_MS;
use crate::constants::DEFAULT_EMIT_TIMEOUT_MS;
use crate::Error;
use crate::Result;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Deadline for a request acknowledgement (unit: milliseconds)
    #[serde(default = "default_emit_timeout_ms")]
    pub emit_timeout_ms: u64,

    /// Deadline for a prerequisite push event (unit: milliseconds)
    #[serde(default = "default_await_timeout_ms")]
    pub await_timeout_ms: u64,

    /// Occurrence polling period (unit: milliseconds)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            emit_timeout_ms: default_emit_timeout_ms(),
            await_timeout_ms: default_await_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl TimeoutConfig {
    pub fn emit_timeout(&self) -> Duration {
        Duration::from_millis(self.emit_timeout_ms)
    }

    pub fn await_timeout(&self) -> Duration {
        Duration::from_millis(self.await_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.emit_timeout_ms == 0 || self.await_timeout_ms == 0 {
            return Err(Error::InvalidConfig("timeouts must be greater than zero".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "timeouts.poll_interval_ms must be greater than zero".into(),
            ));
        }
        if self.poll_interval_ms > self.await_timeout_ms {
            return Err(Error::InvalidConfig(format!(
                "timeouts.poll_interval_ms ({}) exceeds await_timeout_ms ({})",
                self.poll_interval_ms, self.await_timeout_ms
            )));
        }
        Ok(())
    }
}

fn default_emit_timeout_ms() -> u64 {
    DEFAULT_EMIT_TIMEOUT_MS
}
fn default_await_timeout_ms() -> u64 {
    DEFAULT_AWAIT_TIMEOUT_MS
}
fn default_poll_interval_ms() -> u64 {
    DEFAULT_AWAIT_POLL_INTERVAL_MS
}
