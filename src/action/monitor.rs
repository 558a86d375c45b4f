use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use tracing::info;

use super::ignore_uncached;
use super::request;
use super::to_arg;
use super::Empty;
use super::StatefulEmitter;
use crate::utils::weak;
use crate::ActionError;
use crate::Monitor;
use crate::Result;
use crate::Validator;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MonitorIdBody {
    #[serde(rename = "monitorID", deserialize_with = "weak::opt_int")]
    monitor_id: Option<i64>,
}

/// Creates a monitor and returns the id the server assigned.
///
/// The cached copy is stored under that id; `monitor.id` is ignored.
pub async fn add_monitor<E: StatefulEmitter + ?Sized>(
    client: &E,
    validator: &Validator,
    monitor: &Monitor,
) -> Result<i64> {
    validator.validate_monitor(monitor)?;

    let args = vec![to_arg("add", monitor)?];
    let body: MonitorIdBody = request(client, "add", args).await?;
    let id = body
        .monitor_id
        .ok_or(ActionError::InvalidResponse { action: "add" })?;

    let mut created = monitor.clone();
    created.id = id;
    client.state().set_monitor(created)?;
    info!(id, name = %monitor.name, "Added monitor");
    Ok(id)
}

/// Saves changes to an existing monitor, identified by `monitor.id`.
pub async fn edit_monitor<E: StatefulEmitter + ?Sized>(
    client: &E,
    validator: &Validator,
    monitor: &Monitor,
) -> Result<()> {
    validator.validate_monitor(monitor)?;

    let args = vec![to_arg("editMonitor", monitor)?];
    request::<_, MonitorIdBody>(client, "editMonitor", args).await?;
    client.state().set_monitor(monitor.clone())?;
    debug!(id = monitor.id, "Edited monitor");
    Ok(())
}

pub async fn delete_monitor<E: StatefulEmitter + ?Sized>(
    client: &E,
    id: i64,
) -> Result<()> {
    request::<_, Empty>(client, "deleteMonitor", vec![Value::from(id)]).await?;
    let state = client.state();
    ignore_uncached(state.delete_monitor(id))?;
    state.clear_heartbeats(id)?;
    info!(id, "Deleted monitor");
    Ok(())
}

pub async fn pause_monitor<E: StatefulEmitter + ?Sized>(
    client: &E,
    id: i64,
) -> Result<()> {
    set_active(client, "pauseMonitor", id, false).await
}

pub async fn resume_monitor<E: StatefulEmitter + ?Sized>(
    client: &E,
    id: i64,
) -> Result<()> {
    set_active(client, "resumeMonitor", id, true).await
}

async fn set_active<E: StatefulEmitter + ?Sized>(
    client: &E,
    action: &'static str,
    id: i64,
    active: bool,
) -> Result<()> {
    request::<_, Empty>(client, action, vec![Value::from(id)]).await?;
    ignore_uncached(client.state().update_monitor(id, |monitor| monitor.active = active))?;
    debug!(id, active, "Monitor activity changed");
    Ok(())
}

/// Deletes the server side event log of a monitor.
pub async fn clear_events<E: StatefulEmitter + ?Sized>(
    client: &E,
    id: i64,
) -> Result<()> {
    request::<_, Empty>(client, "clearEvents", vec![Value::from(id)]).await?;
    Ok(())
}

/// Deletes a monitor's heartbeat history, on the server and in the cache.
pub async fn clear_heartbeats<E: StatefulEmitter + ?Sized>(
    client: &E,
    id: i64,
) -> Result<()> {
    request::<_, Empty>(client, "clearHeartbeats", vec![Value::from(id)]).await?;
    client.state().clear_heartbeats(id)
}

/// Resets uptime statistics of every monitor.
pub async fn clear_statistics<E: StatefulEmitter + ?Sized>(client: &E) -> Result<()> {
    request::<_, Empty>(client, "clearStatistics", Vec::new()).await?;
    Ok(())
}
