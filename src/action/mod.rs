//! Request/acknowledgement actions.
//!
//! Each action waits for the connection, emits one request, decodes the
//! single-element acknowledgement into `{ ok, msg, ... }` and, on success,
//! updates the [`State`] so the cache agrees with what the server just did.
//! Actions are free functions over any [`StatefulEmitter`], which keeps them
//! testable without a transport.

mod auth;
mod monitor;
mod settings;
mod setup;
mod tag;
pub use auth::*;
pub use monitor::*;
pub use settings::*;
pub use setup::*;
pub use tag::*;

#[cfg(test)]
mod action_test;
#[cfg(test)]
mod tag_test;

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::utils::decode;
use crate::utils::weak;
use crate::ActionError;
use crate::Error;
use crate::EventKind;
use crate::Result;
use crate::State;
use crate::StateError;
use crate::TimeoutConfig;

/// What an action needs from a client.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatefulEmitter: Send + Sync {
    async fn emit(
        &self,
        event: &str,
        timeout: Duration,
        args: Vec<Value>,
    ) -> Result<Value>;

    async fn await_event(
        &self,
        kind: EventKind,
        timeout: Duration,
    ) -> Result<()>;

    fn state(&self) -> State;

    fn timeouts(&self) -> TimeoutConfig;
}

/// Common `{ ok, msg }` acknowledgement wrapper around an action specific
/// body.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default, deserialize_with = "weak::bool")]
    ok: bool,
    #[serde(default, deserialize_with = "weak::opt_string")]
    msg: Option<String>,
    #[serde(flatten)]
    body: T,
}

impl<T> Envelope<T> {
    pub(crate) fn into_result(
        self,
        action: &'static str,
    ) -> Result<T> {
        if self.ok {
            Ok(self.body)
        } else {
            Err(ActionError::Failed {
                action,
                msg: self.msg.unwrap_or_default(),
            }
            .into())
        }
    }
}

/// Body of acknowledgements that carry nothing but `ok` and `msg`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Empty {}

/// Unwraps the acknowledgement of `action` and decodes it into `R`.
///
/// The acknowledgement is a one-element array whose element is either the
/// payload itself or the payload encoded as a JSON string.
pub(crate) fn decode_ack<R: DeserializeOwned>(
    action: &'static str,
    raw: Value,
) -> Result<R> {
    let payload = match raw {
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        _ => return Err(ActionError::InvalidResponse { action }.into()),
    };
    let payload = match payload {
        Value::String(text) => {
            serde_json::from_str(&text).map_err(|e| ActionError::Decode { action, source: e.into() })?
        }
        other => other,
    };
    decode(payload).map_err(|source| ActionError::Decode { action, source }.into())
}

/// Waits until the connection has been established.
pub(crate) async fn await_connected<E: StatefulEmitter + ?Sized>(client: &E) -> Result<()> {
    await_event(client, EventKind::Connect).await
}

pub(crate) async fn await_event<E: StatefulEmitter + ?Sized>(
    client: &E,
    kind: EventKind,
) -> Result<()> {
    let timeout = client.timeouts().await_timeout();
    client.await_event(kind, timeout).await.map_err(|e| {
        ActionError::AwaitFailed {
            event: kind,
            source: Box::new(e),
        }
        .into()
    })
}

/// Emits `action` and returns the raw acknowledgement.
pub(crate) async fn send<E: StatefulEmitter + ?Sized>(
    client: &E,
    action: &'static str,
    args: Vec<Value>,
) -> Result<Value> {
    await_connected(client).await?;

    debug!(action, "Sending action");
    let timeout = client.timeouts().emit_timeout();
    client.emit(action, timeout, args).await.map_err(|e| {
        ActionError::Emit {
            action,
            source: Box::new(e),
        }
        .into()
    })
}

/// Sends `action` and unwraps an `{ ok, msg, ...body }` acknowledgement.
pub(crate) async fn request<E, T>(
    client: &E,
    action: &'static str,
    args: Vec<Value>,
) -> Result<T>
where
    E: StatefulEmitter + ?Sized,
    T: DeserializeOwned,
{
    let raw = send(client, action, args).await?;
    decode_ack::<Envelope<T>>(action, raw)?.into_result(action)
}

/// Treats "nothing cached for this id" as success. Used when the server
/// confirmed a change to an entity the cache never held.
pub(crate) fn ignore_uncached(result: Result<()>) -> Result<()> {
    match result {
        Err(Error::State(StateError::NotFound { .. })) | Err(Error::State(StateError::NotSetYet)) => Ok(()),
        other => other,
    }
}

/// Serializes a request argument.
pub(crate) fn to_arg<T: serde::Serialize>(
    action: &'static str,
    value: &T,
) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| ActionError::Decode { action, source: e.into() }.into())
}
