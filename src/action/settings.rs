use serde::Deserialize;
use serde_json::Value;

use super::request;
use super::to_arg;
use super::Empty;
use super::StatefulEmitter;
use crate::ActionError;
use crate::Result;
use crate::Settings;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsBody {
    data: Option<Settings>,
}

/// Fetches server settings and caches them.
pub async fn get_settings<E: StatefulEmitter + ?Sized>(client: &E) -> Result<Settings> {
    let body: SettingsBody = request(client, "getSettings", Vec::new()).await?;
    let settings = body
        .data
        .ok_or(ActionError::InvalidResponse { action: "getSettings" })?;
    client.state().set_settings(settings.clone())?;
    Ok(settings)
}

/// Saves server settings. The server asks for the current password again.
pub async fn set_settings<E: StatefulEmitter + ?Sized>(
    client: &E,
    settings: &Settings,
    current_password: &str,
) -> Result<()> {
    let args = vec![to_arg("setSettings", settings)?, Value::from(current_password)];
    request::<_, Empty>(client, "setSettings", args).await?;
    client.state().set_settings(settings.clone())
}
