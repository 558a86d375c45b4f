//! Push event handlers.
//!
//! Every event kind the server pushes has one handler that decodes the
//! payload, applies it to the [`State`] and reports whether the event has
//! occurred at least once. Occurrence is tracked one of two ways:
//! - marker based: the handler marks the event name as seen after applying
//!   a payload (message, error, disconnect, monitor list)
//! - presence based: derived from whether the store field the event writes
//!   has left [`Presence::Unset`](crate::Presence::Unset) (connect, info,
//!   heartbeats, auto-login)
//!
//! [`Client::await_event`](crate::Client::await_event) only relies on
//! [`EventHandler::occurred`], so it does not care which one is used.

mod autologin;
mod connect;
mod heartbeat;
mod info;
mod message;
mod monitor_list;
mod registry;
pub use autologin::*;
pub use connect::*;
pub use heartbeat::*;
pub use info::*;
pub use message::*;
pub use monitor_list::*;
pub use registry::*;

#[cfg(test)]
mod registry_test;

use std::fmt;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;

use crate::utils::type_name;
use crate::Error;
use crate::HandlerError;
use crate::HandlerRegistrar;
use crate::Result;
use crate::StateError;

/// The closed set of push events the client understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Connect,
    Disconnect,
    Message,
    Error,
    Info,
    Heartbeat,
    HeartbeatList,
    ImportantHeartbeatList,
    AutoLogin,
    MonitorList,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::Connect,
        EventKind::Disconnect,
        EventKind::Message,
        EventKind::Error,
        EventKind::Info,
        EventKind::Heartbeat,
        EventKind::HeartbeatList,
        EventKind::ImportantHeartbeatList,
        EventKind::AutoLogin,
        EventKind::MonitorList,
    ];

    /// Wire name of the event.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Connect => "connect",
            EventKind::Disconnect => "disconnect",
            EventKind::Message => "message",
            EventKind::Error => "error",
            EventKind::Info => "info",
            EventKind::Heartbeat => "heartbeat",
            EventKind::HeartbeatList => "heartbeatList",
            EventKind::ImportantHeartbeatList => "importantHeartbeatList",
            EventKind::AutoLogin => "autoLogin",
            EventKind::MonitorList => "monitorList",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait EventHandler: Send + Sync + 'static {
    fn event(&self) -> EventKind;

    /// Decodes the positional arguments of one received event and applies
    /// them to the store.
    ///
    /// Either the whole update is applied or nothing is.
    fn handle(
        &self,
        args: &[Value],
    ) -> Result<()>;

    /// True once the event has been received at least once.
    fn occurred(&self) -> bool;

    /// Registers [`EventHandler::handle`] against the transport.
    fn register(
        self: Arc<Self>,
        registrar: &dyn HandlerRegistrar,
    ) -> Result<()> {
        let event = self.event();
        let handler = self;
        registrar.on(event.name(), Arc::new(move |args: &[Value]| handler.handle(args)))
    }
}

// -
// Argument helpers

pub(crate) fn arg(
    event: EventKind,
    args: &[Value],
    index: usize,
) -> Result<&Value> {
    args.get(index)
        .ok_or_else(|| HandlerError::MissingArgument { event, index }.into())
}

pub(crate) fn expect_object(value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        HandlerError::InvalidDataType {
            expected: "object",
            actual: type_name(value),
        }
        .into()
    })
}

pub(crate) fn expect_array(value: &Value) -> Result<&Vec<Value>> {
    value.as_array().ok_or_else(|| {
        HandlerError::InvalidDataType {
            expected: "array",
            actual: type_name(value),
        }
        .into()
    })
}

/// Presence based occurrence: the field has been written, possibly with no
/// entry for the key that was probed.
pub(crate) fn presence_observed<T>(result: Result<T>) -> bool {
    matches!(result, Ok(_) | Err(Error::State(StateError::NotFound { .. })))
}
