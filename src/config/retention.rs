use serde::Deserialize;

use crate::constants::DEFAULT_HEARTBEAT_CAPACITY;
use crate::constants::DEFAULT_IMPORTANT_HEARTBEAT_CAPACITY;
use crate::Error;
use crate::Result;

/// Per-monitor heartbeat buffer capacities.
///
/// The two windows are independent; neither is derived from the other.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RetentionConfig {
    #[serde(default = "default_heartbeat_capacity")]
    pub heartbeat_capacity: usize,

    #[serde(default = "default_important_heartbeat_capacity")]
    pub important_heartbeat_capacity: usize,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            heartbeat_capacity: default_heartbeat_capacity(),
            important_heartbeat_capacity: default_important_heartbeat_capacity(),
        }
    }
}

impl RetentionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.heartbeat_capacity == 0 || self.important_heartbeat_capacity == 0 {
            return Err(Error::InvalidConfig(
                "heartbeat capacities must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

fn default_heartbeat_capacity() -> usize {
    DEFAULT_HEARTBEAT_CAPACITY
}
fn default_important_heartbeat_capacity() -> usize {
    DEFAULT_IMPORTANT_HEARTBEAT_CAPACITY
}
