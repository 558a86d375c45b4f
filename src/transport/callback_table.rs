use dashmap::DashMap;
use serde_json::Value;
use tracing::trace;
use tracing::warn;

use super::EventCallback;
use super::HandlerRegistrar;
use crate::Result;

/// Thread-safe event name to callbacks table.
///
/// Concrete transports embed one and forward every received event to
/// [`CallbackTable::dispatch`].
#[derive(Default)]
pub struct CallbackTable {
    callbacks: DashMap<String, Vec<EventCallback>>,
}

impl CallbackTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(
        &self,
        event: &str,
        callback: EventCallback,
    ) {
        self.callbacks.entry(event.to_string()).or_default().push(callback);
    }

    /// Runs every callback registered for `event`, in registration order.
    ///
    /// Unknown events are ignored. All callbacks run even if one fails; the
    /// first failure is returned.
    pub fn dispatch(
        &self,
        event: &str,
        args: &[Value],
    ) -> Result<()> {
        // Cloned out so callbacks may register further callbacks.
        let callbacks = match self.callbacks.get(event) {
            Some(entry) => entry.value().clone(),
            None => {
                trace!(event, "No callback registered, ignoring");
                return Ok(());
            }
        };

        let mut first_error = None;
        for callback in callbacks {
            if let Err(e) = callback(args) {
                warn!(event, error = %e, "Event callback failed");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn contains(
        &self,
        event: &str,
    ) -> bool {
        self.callbacks.contains_key(event)
    }

    /// Number of distinct event names with at least one callback.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl HandlerRegistrar for CallbackTable {
    fn on(
        &self,
        event: &str,
        callback: EventCallback,
    ) -> Result<()> {
        CallbackTable::on(self, event, callback);
        Ok(())
    }
}
