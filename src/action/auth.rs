use serde::Deserialize;
use serde_json::json;
use serde_json::Value;
use tracing::info;

use super::await_connected;
use super::await_event;
use super::decode_ack;
use super::request;
use super::send;
use super::Empty;
use super::Envelope;
use super::StatefulEmitter;
use crate::utils::weak;
use crate::ActionError;
use crate::EventKind;
use crate::Result;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginBody {
    #[serde(deserialize_with = "weak::opt_string")]
    token: Option<String>,
    #[serde(rename = "tokenRequired", deserialize_with = "weak::bool")]
    token_required: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UriBody {
    #[serde(deserialize_with = "weak::opt_string")]
    uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ValidBody {
    #[serde(deserialize_with = "weak::bool")]
    valid: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StatusBody {
    #[serde(deserialize_with = "weak::bool")]
    status: bool,
}

/// Logs in with a username and password, plus a TOTP code when 2FA is on.
///
/// With an empty username and password this waits for the server to
/// announce auto-login instead of emitting, and returns `None`. Otherwise
/// it returns the session token.
///
/// # Errors
/// `ActionError::TwoFactorTokenRequired` when the account needs a TOTP code
/// and none (or a wrong one) was given; `ActionError::LoginFailed` when the
/// server rejects the credentials.
pub async fn login<E: StatefulEmitter + ?Sized>(
    client: &E,
    username: &str,
    password: &str,
    token: Option<&str>,
) -> Result<Option<String>> {
    if username.is_empty() && password.is_empty() {
        await_connected(client).await?;
        await_event(client, EventKind::AutoLogin).await?;
        client.state().set_logged_in(true)?;
        info!("Logged in through auto-login");
        return Ok(None);
    }

    let args = vec![json!({
        "username": username,
        "password": password,
        "token": token.unwrap_or_default(),
    })];
    let raw = send(client, "login", args).await?;
    let envelope: Envelope<LoginBody> = decode_ack("login", raw)?;

    if envelope.body.token_required {
        return Err(ActionError::TwoFactorTokenRequired.into());
    }
    if !envelope.ok {
        return Err(ActionError::LoginFailed {
            msg: envelope.msg.unwrap_or_default(),
        }
        .into());
    }

    client.state().set_logged_in(true)?;
    info!(username, "Logged in");
    Ok(Some(envelope.body.token.unwrap_or_default()))
}

/// Resumes a session from a token returned by an earlier [`login`].
pub async fn login_by_token<E: StatefulEmitter + ?Sized>(
    client: &E,
    token: &str,
) -> Result<()> {
    let raw = send(client, "loginByToken", vec![Value::from(token)]).await?;
    let envelope: Envelope<Empty> = decode_ack("loginByToken", raw)?;
    if !envelope.ok {
        return Err(ActionError::LoginFailed {
            msg: envelope.msg.unwrap_or_default(),
        }
        .into());
    }

    client.state().set_logged_in(true)?;
    info!("Logged in by token");
    Ok(())
}

/// Ends the session. The acknowledgement carries nothing worth checking.
pub async fn logout<E: StatefulEmitter + ?Sized>(client: &E) -> Result<()> {
    send(client, "logout", Vec::new()).await?;
    client.state().set_logged_in(false)?;
    info!("Logged out");
    Ok(())
}

pub async fn change_password<E: StatefulEmitter + ?Sized>(
    client: &E,
    current_password: &str,
    new_password: &str,
) -> Result<()> {
    let args = vec![json!({
        "currentPassword": current_password,
        "newPassword": new_password,
    })];
    request::<_, Empty>(client, "changePassword", args).await?;
    Ok(())
}

/// Starts 2FA enrollment and returns the `otpauth://` provisioning URI.
pub async fn prepare_2fa<E: StatefulEmitter + ?Sized>(
    client: &E,
    current_password: &str,
) -> Result<String> {
    let body: UriBody = request(client, "prepare2FA", vec![Value::from(current_password)]).await?;
    body.uri
        .ok_or_else(|| ActionError::InvalidResponse { action: "prepare2FA" }.into())
}

pub async fn save_2fa<E: StatefulEmitter + ?Sized>(
    client: &E,
    current_password: &str,
) -> Result<()> {
    request::<_, Empty>(client, "save2FA", vec![Value::from(current_password)]).await?;
    Ok(())
}

pub async fn disable_2fa<E: StatefulEmitter + ?Sized>(
    client: &E,
    current_password: &str,
) -> Result<()> {
    request::<_, Empty>(client, "disable2FA", vec![Value::from(current_password)]).await?;
    Ok(())
}

/// Checks a TOTP code against the pending or active 2FA secret.
pub async fn verify_token<E: StatefulEmitter + ?Sized>(
    client: &E,
    token: &str,
    current_password: &str,
) -> Result<bool> {
    let args = vec![Value::from(token), Value::from(current_password)];
    let body: ValidBody = request(client, "verifyToken", args).await?;
    Ok(body.valid)
}

/// Whether 2FA is enabled for the logged in account.
pub async fn two_fa_status<E: StatefulEmitter + ?Sized>(client: &E) -> Result<bool> {
    let body: StatusBody = request(client, "twoFAStatus", Vec::new()).await?;
    Ok(body.status)
}
