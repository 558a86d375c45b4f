//! In-memory mirror of the server's state.
//!
//! The store is written by push-event handlers and by actions, and read by
//! callers. Every field lives behind one reader/writer lock, so a reader
//! never observes a partially applied update. Fields that the server has not
//! sent yet are [`Presence::Unset`] and their accessors answer
//! [`StateError::NotSetYet`].

mod heartbeat;
mod info;
mod monitor;
mod presence;
mod seen_events;
mod session;
mod tag;

pub use heartbeat::*;
pub use info::*;
pub use monitor::*;
pub use presence::*;
pub use seen_events::*;
pub use tag::*;


use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::config::RetentionConfig;
use crate::utils::Queue;
use crate::Result;
use crate::StateError;

/// Cloneable handle to the shared store.
///
/// Clones share the same underlying data. After [`State::close`] every
/// accessor and setter on every clone fails with [`StateError::StateIsNil`].
#[derive(Clone)]
pub struct State {
    inner: Arc<RwLock<Option<InnerState>>>,
}

pub(crate) struct InnerState {
    pub(crate) seen_events: SeenEvents,
    pub(crate) connected: Presence<bool>,
    pub(crate) logged_in: bool,
    pub(crate) auto_login: Presence<bool>,
    pub(crate) info: Presence<Info>,
    pub(crate) settings: Presence<Settings>,
    pub(crate) monitors: Presence<BTreeMap<i64, Monitor>>,
    pub(crate) tags: Presence<BTreeMap<i64, Tag>>,
    pub(crate) heartbeats: Presence<HashMap<i64, Queue<Heartbeat>>>,
    pub(crate) important_heartbeats: Presence<HashMap<i64, Queue<Heartbeat>>>,
    pub(crate) retention: RetentionConfig,
}

impl InnerState {
    fn new(retention: RetentionConfig) -> Self {
        Self {
            seen_events: SeenEvents::default(),
            connected: Presence::Unset,
            logged_in: false,
            auto_login: Presence::Unset,
            info: Presence::Unset,
            settings: Presence::Unset,
            monitors: Presence::Unset,
            tags: Presence::Value(BTreeMap::new()),
            heartbeats: Presence::Unset,
            important_heartbeats: Presence::Unset,
            retention,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for State {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("State").field("closed", &self.is_closed()).finish()
    }
}

impl State {
    /// Empty store with the default heartbeat retention.
    pub fn new() -> Self {
        Self::with_retention(RetentionConfig::default())
    }

    pub fn with_retention(retention: RetentionConfig) -> Self {
        debug!(
            "Initializing state store, heartbeat capacity: {}, important heartbeat capacity: {}",
            retention.heartbeat_capacity, retention.important_heartbeat_capacity
        );
        Self {
            inner: Arc::new(RwLock::new(Some(InnerState::new(retention)))),
        }
    }

    /// A store that is already absent.
    pub fn detached() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
        }
    }

    /// Tears the store down for every clone of this handle.
    pub fn close(&self) {
        let mut guard = self.inner.write();
        if guard.take().is_some() {
            debug!("State store closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.read().is_none()
    }

    /// Runs `f` under the read lock.
    pub(crate) fn read<R>(
        &self,
        f: impl FnOnce(&InnerState) -> Result<R>,
    ) -> Result<R> {
        let guard = self.inner.read();
        match guard.as_ref() {
            Some(state) => f(state),
            None => Err(StateError::StateIsNil.into()),
        }
    }

    /// Runs `f` under the write lock.
    pub(crate) fn write<R>(
        &self,
        f: impl FnOnce(&mut InnerState) -> R,
    ) -> Result<R> {
        let mut guard = self.inner.write();
        match guard.as_mut() {
            Some(state) => Ok(f(state)),
            None => Err(StateError::StateIsNil.into()),
        }
    }

    pub fn has_seen(
        &self,
        event: &str,
    ) -> bool {
        self.read(|state| Ok(state.seen_events.has_seen(event))).unwrap_or(false)
    }

    pub fn mark_seen(
        &self,
        event: &str,
    ) {
        let _ = self.write(|state| state.seen_events.mark_seen(event));
    }
}
