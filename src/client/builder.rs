use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::Client;
use crate::ClientConfig;
use crate::Connection;
use crate::CredentialsConfig;
use crate::EventCallback;
use crate::HandlerRegistrar;
use crate::HandlerRegistry;
use crate::Result;
use crate::RetentionConfig;
use crate::State;
use crate::Validator;

pub struct ClientBuilder {
    config: ClientConfig,
    connection: Arc<dyn Connection>,
}

impl ClientBuilder {
    /// Create a new builder with default config over `connection`
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            config: ClientConfig::default(),
            connection,
        }
    }

    /// Set acknowledgement timeout (default: 5s)
    pub fn emit_timeout(
        mut self,
        timeout: Duration,
    ) -> Self {
        self.config.timeouts.emit_timeout_ms = saturating_millis(timeout);
        self
    }

    /// Set prerequisite event timeout (default: 5s)
    pub fn await_timeout(
        mut self,
        timeout: Duration,
    ) -> Self {
        self.config.timeouts.await_timeout_ms = saturating_millis(timeout);
        self
    }

    /// Set occurrence polling period (default: 100ms)
    pub fn poll_interval(
        mut self,
        interval: Duration,
    ) -> Self {
        self.config.timeouts.poll_interval_ms = saturating_millis(interval);
        self
    }

    /// Set heartbeat buffer capacities (default: 150 / 25)
    pub fn retention(
        mut self,
        retention: RetentionConfig,
    ) -> Self {
        self.config.retention = retention;
        self
    }

    pub fn credentials(
        mut self,
        credentials: CredentialsConfig,
    ) -> Self {
        self.config.credentials = credentials;
        self
    }

    /// Completely replaces the default configuration
    ///
    /// This discards everything set through the granular methods called
    /// before it, such as [`emit_timeout`](ClientBuilder::emit_timeout).
    pub fn set_config(
        mut self,
        config: ClientConfig,
    ) -> Self {
        self.config = config;
        self
    }

    /// Validates the configuration, creates the store and registers every
    /// event handler against the connection.
    pub fn build(self) -> Result<Client> {
        self.config.validate()?;

        let state = State::with_retention(self.config.retention);
        let handlers = HandlerRegistry::new(&state);
        handlers.register_all(&ConnectionRegistrar(self.connection.as_ref()))?;

        info!(
            emit_timeout_ms = self.config.timeouts.emit_timeout_ms,
            await_timeout_ms = self.config.timeouts.await_timeout_ms,
            "Client initialized"
        );

        Ok(Client {
            connection: self.connection,
            state,
            handlers: Arc::new(handlers),
            config: self.config,
            validator: Validator::new(),
        })
    }
}

/// Registers through a borrowed connection as a plain [`HandlerRegistrar`].
struct ConnectionRegistrar<'a>(&'a dyn Connection);

impl HandlerRegistrar for ConnectionRegistrar<'_> {
    fn on(
        &self,
        event: &str,
        callback: EventCallback,
    ) -> Result<()> {
        self.0.on(event, callback)
    }
}

/// Whole milliseconds, clamped to `u64::MAX`.
pub(super) fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
