use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::State;
use crate::constants::KIND_MONITOR;
use crate::utils::weak;
use crate::Result;
use crate::StateError;

/// A monitored resource as the server describes it.
///
/// Fields the client does not model are preserved in `extra` and sent back
/// unchanged when the monitor is edited. Server-computed fields are never
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Monitor {
    #[serde(deserialize_with = "weak::int")]
    pub id: i64,
    #[serde(deserialize_with = "weak::string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "weak::string")]
    pub monitor_type: String,
    #[serde(deserialize_with = "weak::opt_string")]
    pub description: Option<String>,
    #[serde(skip_serializing, deserialize_with = "weak::bool")]
    pub active: bool,
    #[serde(deserialize_with = "weak::opt_int")]
    pub parent: Option<i64>,
    #[serde(rename = "childrenIds", skip_serializing, deserialize_with = "weak::ints")]
    pub children_ids: Vec<i64>,
    #[serde(rename = "pathName", skip_serializing, deserialize_with = "weak::opt_string")]
    pub path_name: Option<String>,
    #[serde(skip_serializing, deserialize_with = "weak::opt_bool")]
    pub maintenance: Option<bool>,
    #[serde(rename = "forceInactive", skip_serializing, deserialize_with = "weak::opt_bool")]
    pub force_inactive: Option<bool>,
    #[serde(skip_serializing)]
    pub tags: Vec<Value>,

    // Scheduling
    #[serde(deserialize_with = "weak::int")]
    pub interval: i64,
    #[serde(rename = "retryInterval", deserialize_with = "weak::int")]
    pub retry_interval: i64,
    #[serde(rename = "resendInterval", deserialize_with = "weak::int")]
    pub resend_interval: i64,
    #[serde(deserialize_with = "weak::int")]
    pub maxretries: i64,
    #[serde(deserialize_with = "weak::opt_int")]
    pub weight: Option<i64>,
    #[serde(rename = "upsideDown", deserialize_with = "weak::bool")]
    pub upside_down: bool,

    // HTTP
    #[serde(deserialize_with = "weak::opt_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub method: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub body: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub headers: Option<String>,
    #[serde(rename = "httpBodyEncoding", deserialize_with = "weak::opt_string")]
    pub http_body_encoding: Option<String>,
    #[serde(deserialize_with = "weak::int")]
    pub maxredirects: i64,
    #[serde(deserialize_with = "weak::strings")]
    pub accepted_statuscodes: Vec<String>,
    #[serde(rename = "ignoreTls", deserialize_with = "weak::bool")]
    pub ignore_tls: bool,
    #[serde(rename = "expiryNotification", deserialize_with = "weak::opt_bool")]
    pub expiry_notification: Option<bool>,
    #[serde(rename = "authMethod", deserialize_with = "weak::opt_string")]
    pub auth_method: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub basic_auth_user: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub basic_auth_pass: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub keyword: Option<String>,
    #[serde(rename = "invertKeyword", deserialize_with = "weak::bool")]
    pub invert_keyword: bool,
    #[serde(rename = "proxyId", deserialize_with = "weak::opt_int")]
    pub proxy_id: Option<i64>,

    // Host based checks
    #[serde(deserialize_with = "weak::opt_string")]
    pub hostname: Option<String>,
    #[serde(deserialize_with = "weak::opt_int")]
    pub port: Option<i64>,
    #[serde(rename = "packetSize", deserialize_with = "weak::int")]
    pub packet_size: i64,
    #[serde(deserialize_with = "weak::opt_string")]
    pub dns_resolve_server: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub dns_resolve_type: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub dns_last_result: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub docker_container: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub docker_host: Option<String>,
    #[serde(rename = "databaseConnectionString", deserialize_with = "weak::opt_string")]
    pub database_connection_string: Option<String>,
    #[serde(rename = "databaseQuery", deserialize_with = "weak::opt_string")]
    pub database_query: Option<String>,
    #[serde(rename = "pushToken", deserialize_with = "weak::opt_string")]
    pub push_token: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub game: Option<String>,

    #[serde(rename = "notificationIDList")]
    pub notification_id_list: BTreeMap<String, Value>,

    /// Unmodelled fields, kept for round-tripping.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl State {
    /// All cached monitors ordered by id.
    pub fn monitors(&self) -> Result<Vec<Monitor>> {
        self.read(|state| Ok(state.monitors.get()?.values().cloned().collect()))
    }

    pub fn monitor(
        &self,
        id: i64,
    ) -> Result<Monitor> {
        self.read(|state| {
            state
                .monitors
                .get()?
                .get(&id)
                .cloned()
                .ok_or_else(|| StateError::NotFound { kind: KIND_MONITOR, id }.into())
        })
    }

    /// Replaces the whole monitor table.
    pub fn set_monitors(
        &self,
        monitors: BTreeMap<i64, Monitor>,
    ) -> Result<()> {
        self.write(|state| state.monitors.set(monitors))
    }

    /// Inserts or replaces one monitor, keyed by its id.
    pub fn set_monitor(
        &self,
        monitor: Monitor,
    ) -> Result<()> {
        self.write(|state| {
            state.monitors.get_or_insert_with(BTreeMap::new).insert(monitor.id, monitor);
        })
    }

    pub fn delete_monitor(
        &self,
        id: i64,
    ) -> Result<()> {
        self.write(|state| -> Result<()> {
            match state.monitors.get_mut()?.remove(&id) {
                Some(_) => Ok(()),
                None => Err(StateError::NotFound { kind: KIND_MONITOR, id }.into()),
            }
        })?
    }

    /// Mutates one cached monitor in place.
    pub fn update_monitor(
        &self,
        id: i64,
        f: impl FnOnce(&mut Monitor),
    ) -> Result<()> {
        self.write(|state| -> Result<()> {
            match state.monitors.get_mut()?.get_mut(&id) {
                Some(monitor) => {
                    f(monitor);
                    Ok(())
                }
                None => Err(StateError::NotFound { kind: KIND_MONITOR, id }.into()),
            }
        })?
    }
}
