use serde::Deserialize;

use crate::constants::DEFAULT_HOST;
use crate::constants::DEFAULT_PORT;
use crate::constants::SOCKET_IO_PATH;
use crate::Error;
use crate::Result;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Use `wss` instead of `ws`
    #[serde(default)]
    pub secure: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            secure: false,
        }
    }
}

impl ConnectionConfig {
    /// Socket.io websocket endpoint of the server.
    pub fn url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{}://{}:{}{}", scheme, self.host, self.port, SOCKET_IO_PATH)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig("connection.host must not be empty".into()));
        }
        if self.host.contains("://") {
            return Err(Error::InvalidConfig(format!(
                "connection.host must be a bare host name, got {}",
                self.host
            )));
        }
        if self.port == 0 {
            return Err(Error::InvalidConfig("connection.port must be non-zero".into()));
        }
        Ok(())
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
