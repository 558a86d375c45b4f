use serde::Deserialize;
use serde_json::json;
use serde_json::Value;
use tracing::debug;

use super::arg;
use super::expect_array;
use super::expect_object;
use super::presence_observed;
use super::EventHandler;
use super::EventKind;
use crate::utils::decode;
use crate::utils::decode_slice;
use crate::utils::weak;
use crate::Heartbeat;
use crate::HandlerError;
use crate::Result;
use crate::State;

/// Monitor id probed by the occurrence checks. Any answer other than
/// `NotSetYet` means the buffers exist.
const PROBE_MONITOR_ID: i64 = 0;

/// Out-of-band arguments of a heartbeat list event.
#[derive(Debug, Deserialize)]
struct ListHeader {
    #[serde(rename = "monitorId", deserialize_with = "weak::int")]
    monitor_id: i64,
    #[serde(default, deserialize_with = "weak::bool")]
    overwrite: bool,
}

/// Decodes `(monitorId, list, overwrite)` into the owning monitor, the
/// samples and the overwrite flag.
fn decode_list(
    event: EventKind,
    args: &[Value],
) -> Result<(i64, Vec<Heartbeat>, bool)> {
    let id = arg(event, args, 0)?;
    let list = expect_array(arg(event, args, 1)?)?;
    let overwrite = args.get(2).cloned().unwrap_or(Value::Null);

    let header: ListHeader = decode(json!({ "monitorId": id, "overwrite": overwrite }))
        .map_err(|source| HandlerError::Decode { event, source })?;
    let beats = decode_slice::<Heartbeat>(list).map_err(|source| HandlerError::Decode { event, source })?;

    Ok((header.monitor_id, beats, header.overwrite))
}

/// One live heartbeat.
pub struct HeartbeatHandler {
    state: State,
}

impl HeartbeatHandler {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl EventHandler for HeartbeatHandler {
    fn event(&self) -> EventKind {
        EventKind::Heartbeat
    }

    fn handle(
        &self,
        args: &[Value],
    ) -> Result<()> {
        let data = expect_object(arg(self.event(), args, 0)?)?;
        let beat: Heartbeat = decode(Value::Object(data.clone())).map_err(|source| HandlerError::Decode {
            event: self.event(),
            source,
        })?;

        debug!(monitor_id = beat.monitor_id, important = beat.important, "Received heartbeat event");
        self.state.append_heartbeat(beat)
    }

    fn occurred(&self) -> bool {
        presence_observed(self.state.heartbeats(PROBE_MONITOR_ID))
            || presence_observed(self.state.important_heartbeats(PROBE_MONITOR_ID))
    }
}

/// Heartbeat history of one monitor.
pub struct HeartbeatListHandler {
    state: State,
}

impl HeartbeatListHandler {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl EventHandler for HeartbeatListHandler {
    fn event(&self) -> EventKind {
        EventKind::HeartbeatList
    }

    fn handle(
        &self,
        args: &[Value],
    ) -> Result<()> {
        let (monitor_id, beats, overwrite) = decode_list(self.event(), args)?;

        debug!(monitor_id, count = beats.len(), overwrite, "Received heartbeatList event");
        self.state.set_heartbeats(monitor_id, beats, overwrite)
    }

    fn occurred(&self) -> bool {
        presence_observed(self.state.heartbeats(PROBE_MONITOR_ID))
    }
}

/// Status transition history of one monitor.
pub struct ImportantHeartbeatListHandler {
    state: State,
}

impl ImportantHeartbeatListHandler {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl EventHandler for ImportantHeartbeatListHandler {
    fn event(&self) -> EventKind {
        EventKind::ImportantHeartbeatList
    }

    fn handle(
        &self,
        args: &[Value],
    ) -> Result<()> {
        let (monitor_id, beats, overwrite) = decode_list(self.event(), args)?;

        debug!(
            monitor_id,
            count = beats.len(),
            overwrite,
            "Received importantHeartbeatList event"
        );
        self.state.set_important_heartbeats(monitor_id, beats, overwrite)
    }

    fn occurred(&self) -> bool {
        presence_observed(self.state.important_heartbeats(PROBE_MONITOR_ID))
    }
}
