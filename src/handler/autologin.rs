use serde_json::Value;
use tracing::debug;

use super::presence_observed;
use super::EventHandler;
use super::EventKind;
use crate::Result;
use crate::State;

/// The server logged the session in without credentials.
pub struct AutoLoginHandler {
    state: State,
}

impl AutoLoginHandler {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl EventHandler for AutoLoginHandler {
    fn event(&self) -> EventKind {
        EventKind::AutoLogin
    }

    fn handle(
        &self,
        _args: &[Value],
    ) -> Result<()> {
        debug!("Received autoLogin event");
        self.state.set_auto_login(true)
    }

    fn occurred(&self) -> bool {
        presence_observed(self.state.auto_login())
    }
}
