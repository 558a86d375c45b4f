use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::State;
use crate::constants::KIND_HEARTBEATS;
use crate::constants::KIND_IMPORTANT_HEARTBEATS;
use crate::utils::weak;
use crate::utils::Queue;
use crate::Result;
use crate::StateError;

/// One health check sample for a monitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heartbeat {
    #[serde(rename = "down_count", alias = "downCount", deserialize_with = "weak::int")]
    pub down_count: i64,
    #[serde(deserialize_with = "weak::int")]
    pub duration: i64,
    #[serde(deserialize_with = "weak::int")]
    pub id: i64,
    #[serde(deserialize_with = "weak::bool")]
    pub important: bool,
    #[serde(rename = "monitorId", alias = "monitor_id", deserialize_with = "weak::int")]
    pub monitor_id: i64,
    #[serde(deserialize_with = "weak::string")]
    pub msg: String,
    #[serde(deserialize_with = "weak::opt_int")]
    pub ping: Option<i64>,
    #[serde(deserialize_with = "weak::bool")]
    pub status: bool,
    /// Opaque server timestamp, kept as sent.
    #[serde(deserialize_with = "weak::string")]
    pub time: String,
}

fn snapshot(
    buffers: &super::Presence<HashMap<i64, Queue<Heartbeat>>>,
    kind: &'static str,
    monitor_id: i64,
) -> Result<Vec<Heartbeat>> {
    let buffers = buffers.get()?;
    buffers
        .get(&monitor_id)
        .map(Queue::to_vec)
        .ok_or_else(|| StateError::NotFound { kind, id: monitor_id }.into())
}

/// Replaces or extends one monitor's buffer.
///
/// An overwrite is a server-provided window and is stored untrimmed.
fn merge(
    buffers: &mut HashMap<i64, Queue<Heartbeat>>,
    monitor_id: i64,
    beats: Vec<Heartbeat>,
    overwrite: bool,
    capacity: usize,
) {
    let beats = beats.into_iter().map(|mut beat| {
        beat.monitor_id = monitor_id;
        beat
    });

    let queue = buffers.entry(monitor_id).or_default();
    if overwrite {
        queue.replace(beats.collect());
        return;
    }
    for beat in beats {
        queue.push(beat);
    }
    queue.trim(capacity);
}

impl State {
    /// Snapshot of the general heartbeat buffer of a monitor.
    pub fn heartbeats(
        &self,
        monitor_id: i64,
    ) -> Result<Vec<Heartbeat>> {
        self.read(|state| snapshot(&state.heartbeats, KIND_HEARTBEATS, monitor_id))
    }

    /// Snapshot of the important heartbeat buffer of a monitor.
    pub fn important_heartbeats(
        &self,
        monitor_id: i64,
    ) -> Result<Vec<Heartbeat>> {
        self.read(|state| snapshot(&state.important_heartbeats, KIND_IMPORTANT_HEARTBEATS, monitor_id))
    }

    pub fn set_heartbeats(
        &self,
        monitor_id: i64,
        beats: Vec<Heartbeat>,
        overwrite: bool,
    ) -> Result<()> {
        self.write(|state| {
            let capacity = state.retention.heartbeat_capacity;
            let buffers = state.heartbeats.get_or_insert_with(HashMap::new);
            merge(buffers, monitor_id, beats, overwrite, capacity);
        })
    }

    pub fn set_important_heartbeats(
        &self,
        monitor_id: i64,
        beats: Vec<Heartbeat>,
        overwrite: bool,
    ) -> Result<()> {
        self.write(|state| {
            let capacity = state.retention.important_heartbeat_capacity;
            let buffers = state.important_heartbeats.get_or_insert_with(HashMap::new);
            merge(buffers, monitor_id, beats, overwrite, capacity);
        })
    }

    /// Ingests one live sample into the buffer chosen by `beat.important`.
    pub fn append_heartbeat(
        &self,
        beat: Heartbeat,
    ) -> Result<()> {
        self.write(|state| {
            let (buffers, capacity) = if beat.important {
                (
                    state.important_heartbeats.get_or_insert_with(HashMap::new),
                    state.retention.important_heartbeat_capacity,
                )
            } else {
                (
                    state.heartbeats.get_or_insert_with(HashMap::new),
                    state.retention.heartbeat_capacity,
                )
            };
            let queue = buffers.entry(beat.monitor_id).or_default();
            queue.push(beat);
            queue.trim(capacity);
        })
    }

    /// Drops every buffered heartbeat of a monitor, general and important.
    pub fn clear_heartbeats(
        &self,
        monitor_id: i64,
    ) -> Result<()> {
        self.write(|state| {
            if let Ok(buffers) = state.heartbeats.get_mut() {
                buffers.remove(&monitor_id);
            }
            if let Ok(buffers) = state.important_heartbeats.get_mut() {
                buffers.remove(&monitor_id);
            }
        })
    }
}
