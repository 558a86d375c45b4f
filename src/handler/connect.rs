use serde_json::Value;
use tracing::debug;

use super::presence_observed;
use super::EventHandler;
use super::EventKind;
use crate::Result;
use crate::State;

/// Connection established. Presence based on `connected`.
pub struct ConnectHandler {
    state: State,
}

impl ConnectHandler {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl EventHandler for ConnectHandler {
    fn event(&self) -> EventKind {
        EventKind::Connect
    }

    fn handle(
        &self,
        _args: &[Value],
    ) -> Result<()> {
        debug!("Received connect event");
        self.state.set_connected(true)
    }

    fn occurred(&self) -> bool {
        presence_observed(self.state.connected())
    }
}

/// Connection lost. Marker based, since `connected` is also written by
/// [`ConnectHandler`].
pub struct DisconnectHandler {
    state: State,
}

impl DisconnectHandler {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl EventHandler for DisconnectHandler {
    fn event(&self) -> EventKind {
        EventKind::Disconnect
    }

    fn handle(
        &self,
        args: &[Value],
    ) -> Result<()> {
        let reason = args.first().cloned().unwrap_or(Value::Null);
        debug!(%reason, "Received disconnect event");

        let event = self.event().name();
        self.state.write(|state| {
            state.connected.set(false);
            state.seen_events.mark_seen(event);
        })
    }

    fn occurred(&self) -> bool {
        self.state.has_seen(self.event().name())
    }
}
