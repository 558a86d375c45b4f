//! Client Error Hierarchy
//!
//! Defines the error types surfaced by the state store, the event handlers,
//! the await primitive, the transport boundary and the request/acknowledgement
//! actions. Every failure is a returned value; the only panic in the crate is
//! awaiting an event kind that has no registered handler.

use std::time::Duration;

use config::ConfigError;

use crate::EventKind;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// State store access failures
    #[error(transparent)]
    State(#[from] StateError),

    /// Event kind did not occur before the deadline
    #[error(transparent)]
    Await(#[from] AwaitError),

    /// Transport boundary failures (emit, registration, closed connection)
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Push payload could not be decoded or applied
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// Request/acknowledgement action failures
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Pre-store validation of outgoing entities
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration source failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration rule violations
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Returns true if any deadline expired, either while awaiting an event
    /// or while waiting for an acknowledgement.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Await(AwaitError::Timeout { .. }) => true,
            Error::Transport(TransportError::AckTimeout { .. }) => true,
            Error::Action(ActionError::AwaitFailed { source, .. }) => source.is_timeout(),
            Error::Action(ActionError::Emit { source, .. }) => source.is_timeout(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// The store was never created or has been torn down
    #[error("state is nil")]
    StateIsNil,

    /// The field has not been received from the server yet
    #[error("value not set yet")]
    NotSetYet,

    /// Keyed lookup against a known collection found no entry
    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: i64 },
}

#[derive(Debug, thiserror::Error)]
pub enum AwaitError {
    #[error("Timed out after {timeout:?} waiting for event {event}")]
    Timeout { event: EventKind, timeout: Duration },
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// No acknowledgement arrived before the deadline
    #[error("No acknowledgement for {event} after {timeout:?}")]
    AckTimeout { event: String, timeout: Duration },

    /// The connection has been closed
    #[error("Connection closed")]
    Closed,

    /// The request could not be sent
    #[error("Failed to emit {event}: {reason}")]
    Emit { event: String, reason: String },

    /// A callback could not be registered
    #[error("Failed to register callback for {event}: {reason}")]
    Registration { event: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Payload shape did not match what the handler requires
    #[error("invalid data type: expected {expected}, got {actual}")]
    InvalidDataType {
        expected: &'static str,
        actual: &'static str,
    },

    /// A positional argument the handler relies on was not delivered
    #[error("{event} payload is missing argument {index}")]
    MissingArgument { event: EventKind, index: usize },

    /// Structural decode of a well-shaped payload failed
    #[error("decode failed for {event}: {source}")]
    Decode {
        event: EventKind,
        #[source]
        source: DecodeError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Server acknowledged the request with `ok: false`
    #[error("action {action} failed: {msg}")]
    Failed { action: &'static str, msg: String },

    /// Credentials were rejected
    #[error("auth failed: {msg}")]
    LoginFailed { msg: String },

    /// Login needs a second factor token
    #[error("2fa token required")]
    TwoFactorTokenRequired,

    /// Acknowledgement payload did not have the expected envelope
    #[error("invalid response for {action}")]
    InvalidResponse { action: &'static str },

    /// Acknowledgement body could not be decoded
    #[error("decode failed for {action}: {source}")]
    Decode {
        action: &'static str,
        #[source]
        source: DecodeError,
    },

    /// Transport failure while emitting the request
    #[error("emit failed for {action}: {source}")]
    Emit {
        action: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// A prerequisite event did not occur
    #[error("await failed for event {event}: {source}")]
    AwaitFailed {
        event: EventKind,
        #[source]
        source: Box<Error>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Map key could not be parsed as an integer id
    #[error("invalid id key: {0}")]
    InvalidKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub(crate) fn new(
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
