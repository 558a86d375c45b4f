use serde_json::Value;
use tracing::debug;

use super::arg;
use super::expect_object;
use super::presence_observed;
use super::EventHandler;
use super::EventKind;
use crate::utils::decode;
use crate::HandlerError;
use crate::Info;
use crate::Result;
use crate::State;

pub struct InfoHandler {
    state: State,
}

impl InfoHandler {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl EventHandler for InfoHandler {
    fn event(&self) -> EventKind {
        EventKind::Info
    }

    fn handle(
        &self,
        args: &[Value],
    ) -> Result<()> {
        let data = expect_object(arg(self.event(), args, 0)?)?;
        let info: Info = decode(Value::Object(data.clone())).map_err(|source| HandlerError::Decode {
            event: self.event(),
            source,
        })?;

        debug!(version = ?info.version, "Received info event");
        self.state.set_info(info)
    }

    fn occurred(&self) -> bool {
        presence_observed(self.state.info())
    }
}
