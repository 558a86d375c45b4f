//! Client configuration.
//!
//! Loaded from multiple sources with priority:
//! 1. Default values (hardcoded)
//! 2. Optional TOML file
//! 3. Environment variables prefixed with `UPTIME_KUMA`, nested with `__`
//!    (e.g. `UPTIME_KUMA__CONNECTION__PORT=3002`)

mod connection;
mod credentials;
mod retention;
mod timeouts;
pub use connection::*;
pub use credentials::*;
pub use retention::*;
pub use timeouts::*;


//---
use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::constants::ENV_PREFIX;
use crate::Result;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ClientConfig {
    /// Server endpoint
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Acknowledgement and await deadlines
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    /// Heartbeat buffer capacities
    #[serde(default)]
    pub retention: RetentionConfig,
    /// Login material
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl ClientConfig {
    /// Loads and validates the configuration.
    ///
    /// # Arguments
    /// * `path` - Optional TOML file layered over the defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let config: ClientConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.connection.validate()?;
        self.timeouts.validate()?;
        self.retention.validate()?;
        self.credentials.validate()?;
        Ok(())
    }
}
