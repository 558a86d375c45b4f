use serde_json::Value;
use tracing::debug;

use super::arg;
use super::expect_object;
use super::EventHandler;
use super::EventKind;
use crate::utils::decode_map;
use crate::HandlerError;
use crate::Monitor;
use crate::Result;
use crate::State;

/// Full monitor table, keyed by stringified monitor id.
///
/// Marker based: an empty list is a valid answer, and the first one is what
/// callers wait for.
pub struct MonitorListHandler {
    state: State,
}

impl MonitorListHandler {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl EventHandler for MonitorListHandler {
    fn event(&self) -> EventKind {
        EventKind::MonitorList
    }

    fn handle(
        &self,
        args: &[Value],
    ) -> Result<()> {
        let data = expect_object(arg(self.event(), args, 0)?)?;
        let monitors = decode_map::<Monitor>(data).map_err(|source| HandlerError::Decode {
            event: self.event(),
            source,
        })?;

        debug!(count = monitors.len(), "Received monitorList event");
        let event = self.event().name();
        self.state.write(|state| {
            state.monitors.set(monitors);
            state.seen_events.mark_seen(event);
        })
    }

    fn occurred(&self) -> bool {
        self.state.has_seen(self.event().name())
    }
}
