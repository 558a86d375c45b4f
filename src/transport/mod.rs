//! Boundary with the socket.io transport.
//!
//! The transport itself is not part of this crate. It plugs in through two
//! seams: [`HandlerRegistrar`] for inbound push events and [`Connection`] for
//! request/acknowledgement round trips. Push event arguments are positional
//! [`serde_json::Value`]s exactly as they came off the wire.

mod callback_table;
pub use callback_table::*;


use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::Result;

/// Decode-and-apply callback invoked for every received push event.
pub type EventCallback = Arc<dyn Fn(&[Value]) -> Result<()> + Send + Sync>;

#[cfg_attr(test, automock)]
pub trait HandlerRegistrar: Send + Sync {
    /// Registers `callback` for every future occurrence of `event`.
    fn on(
        &self,
        event: &str,
        callback: EventCallback,
    ) -> Result<()>;
}

#[async_trait]
pub trait Connection: HandlerRegistrar {
    /// Emits `event` and waits for the server acknowledgement.
    ///
    /// # Errors
    /// - `TransportError::AckTimeout` when nothing arrives within `timeout`
    /// - `TransportError::Closed` after [`Connection::close`]
    async fn ack(
        &self,
        event: &str,
        timeout: Duration,
        args: Vec<Value>,
    ) -> Result<Value>;

    /// Closes the underlying socket. Idempotent.
    async fn close(&self);
}
