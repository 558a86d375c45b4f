use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::State;
use crate::utils::weak;
use crate::Result;

/// Server info snapshot pushed after connecting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    #[serde(rename = "latestVersion", deserialize_with = "weak::opt_string")]
    pub latest_version: Option<String>,
    #[serde(rename = "primaryBaseURL", deserialize_with = "weak::opt_string")]
    pub primary_base_url: Option<String>,
    #[serde(rename = "serverTimezone", deserialize_with = "weak::opt_string")]
    pub server_timezone: Option<String>,
    #[serde(rename = "serverTimezoneOffset", deserialize_with = "weak::opt_string")]
    pub server_timezone_offset: Option<String>,
    #[serde(deserialize_with = "weak::opt_string")]
    pub version: Option<String>,
}

/// Server-wide settings.
///
/// Only the fields set to `Some` are sent when saving, so a partially
/// populated value updates just those settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "checkUpdate", skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_bool")]
    pub check_update: Option<bool>,
    #[serde(rename = "checkBeta", skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_bool")]
    pub check_beta: Option<bool>,
    #[serde(rename = "keepDataPeriodDays", skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_int")]
    pub keep_data_period_days: Option<i64>,
    #[serde(rename = "serverTimezone", skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_string")]
    pub server_timezone: Option<String>,
    #[serde(rename = "entryPage", skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_string")]
    pub entry_page: Option<String>,
    #[serde(rename = "searchEngineIndex", skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_bool")]
    pub search_engine_index: Option<bool>,
    #[serde(rename = "primaryBaseURL", skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_string")]
    pub primary_base_url: Option<String>,
    #[serde(rename = "steamAPIKey", skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_string")]
    pub steam_api_key: Option<String>,
    #[serde(rename = "dnsCache", skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_bool")]
    pub dns_cache: Option<bool>,
    #[serde(rename = "tlsExpiryNotifyDays", skip_serializing_if = "Vec::is_empty", deserialize_with = "weak::ints")]
    pub tls_expiry_notify_days: Vec<i64>,
    #[serde(rename = "disableAuth", skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_bool")]
    pub disable_auth: Option<bool>,
    #[serde(rename = "trustProxy", skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_bool")]
    pub trust_proxy: Option<bool>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl State {
    pub fn info(&self) -> Result<Info> {
        self.read(|state| Ok(state.info.get()?.clone()))
    }

    pub fn set_info(
        &self,
        info: Info,
    ) -> Result<()> {
        self.write(|state| state.info.set(info))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.read(|state| Ok(state.settings.get()?.clone()))
    }

    pub fn set_settings(
        &self,
        settings: Settings,
    ) -> Result<()> {
        self.write(|state| state.settings.set(settings))
    }
}
