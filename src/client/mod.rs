//! Client entry point.
//!
//! Wires a transport [`Connection`] to the [`State`] store through the
//! [`HandlerRegistry`], and exposes the request/acknowledgement round trip
//! and the [`Client::await_event`] rendezvous that actions build on.
//!
//! # Basic Usage
//! ```ignore
//! use std::time::Duration;
//!
//! use kuma_client::action;
//! use kuma_client::Client;
//! use kuma_client::EventKind;
//!
//! let client = Client::builder(connection)
//!     .emit_timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! client.await_event(EventKind::Connect, Duration::from_secs(5)).await?;
//! action::login(&client, "admin", "secret", None).await?;
//! action::get_tags(&client).await?;
//!
//! println!("{:?}", client.state().tags()?);
//! ```

mod builder;
pub use builder::*;

#[cfg(test)]
mod client_test;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use tracing::info;

use crate::action::StatefulEmitter;
use crate::AwaitError;
use crate::ClientConfig;
use crate::Connection;
use crate::EventCallback;
use crate::EventKind;
use crate::HandlerRegistrar;
use crate::HandlerRegistry;
use crate::Result;
use crate::State;
use crate::TimeoutConfig;
use crate::Validator;

/// Smallest poll period `await_event` will use.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// A connected session.
///
/// Created through [`Client::builder`]. Clones share the connection and the
/// store.
#[derive(Clone)]
pub struct Client {
    pub(super) connection: Arc<dyn Connection>,
    pub(super) state: State,
    pub(super) handlers: Arc<HandlerRegistry>,
    pub(super) config: ClientConfig,
    pub(super) validator: Validator,
}

impl Client {
    /// Starts building a client over an established transport.
    pub fn builder(connection: Arc<dyn Connection>) -> ClientBuilder {
        ClientBuilder::new(connection)
    }

    /// The local mirror of the server state.
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Sends `event` and waits up to `timeout` for its acknowledgement.
    pub async fn emit(
        &self,
        event: &str,
        timeout: Duration,
        args: Vec<Value>,
    ) -> Result<Value> {
        debug!(event, ?timeout, "Emitting request");
        self.connection.ack(event, timeout, args).await
    }

    /// Registers an extra callback for a raw event name.
    pub fn on(
        &self,
        event: &str,
        callback: EventCallback,
    ) -> Result<()> {
        self.connection.on(event, callback)
    }

    /// True once `kind` has been received at least once.
    pub fn occurred(
        &self,
        kind: EventKind,
    ) -> bool {
        self.handlers.occurred(kind)
    }

    /// Waits until `kind` has occurred at least once.
    ///
    /// Returns immediately if it already has. Any number of callers may wait
    /// on the same kind concurrently. The poll loop runs inside the calling
    /// task and is dropped when the deadline fires.
    ///
    /// # Errors
    /// `AwaitError::Timeout` if the event did not occur within `timeout`.
    ///
    /// # Panics
    /// If no handler is registered for `kind`.
    pub async fn await_event(
        &self,
        kind: EventKind,
        timeout: Duration,
    ) -> Result<()> {
        let handler = self.handlers.get(kind).clone();
        let period = self.config.timeouts.poll_interval().max(MIN_POLL_INTERVAL);

        let poll = async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if handler.occurred() {
                    return;
                }
            }
        };

        match tokio::time::timeout(timeout, poll).await {
            Ok(()) => Ok(()),
            Err(_) => {
                debug!(event = %kind, ?timeout, "Await timed out");
                Err(AwaitError::Timeout { event: kind, timeout }.into())
            }
        }
    }

    /// Closes the transport and tears down the store.
    ///
    /// Every later store access through this client or any clone fails with
    /// `StateIsNil`.
    pub async fn close(&self) {
        self.connection.close().await;
        self.state.close();
        info!("Client closed");
    }
}

#[async_trait]
impl StatefulEmitter for Client {
    async fn emit(
        &self,
        event: &str,
        timeout: Duration,
        args: Vec<Value>,
    ) -> Result<Value> {
        Client::emit(self, event, timeout, args).await
    }

    async fn await_event(
        &self,
        kind: EventKind,
        timeout: Duration,
    ) -> Result<()> {
        Client::await_event(self, kind, timeout).await
    }

    fn state(&self) -> State {
        self.state.clone()
    }

    fn timeouts(&self) -> TimeoutConfig {
        self.config.timeouts
    }
}
