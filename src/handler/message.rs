use serde_json::Value;
use tracing::info;
use tracing::warn;

use super::EventHandler;
use super::EventKind;
use crate::Result;
use crate::State;

/// Generic socket.io message, logged only.
pub struct MessageHandler {
    state: State,
}

impl MessageHandler {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl EventHandler for MessageHandler {
    fn event(&self) -> EventKind {
        EventKind::Message
    }

    fn handle(
        &self,
        args: &[Value],
    ) -> Result<()> {
        let data = args.first().cloned().unwrap_or(Value::Null);
        info!(%data, "Received message event");
        self.state.mark_seen(self.event().name());
        Ok(())
    }

    fn occurred(&self) -> bool {
        self.state.has_seen(self.event().name())
    }
}

/// Transport level error reported by the server or the socket.
pub struct ErrorHandler {
    state: State,
}

impl ErrorHandler {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl EventHandler for ErrorHandler {
    fn event(&self) -> EventKind {
        EventKind::Error
    }

    fn handle(
        &self,
        args: &[Value],
    ) -> Result<()> {
        let data = args.first().cloned().unwrap_or(Value::Null);
        warn!(%data, "Received error event");
        self.state.mark_seen(self.event().name());
        Ok(())
    }

    fn occurred(&self) -> bool {
        self.state.has_seen(self.event().name())
    }
}
