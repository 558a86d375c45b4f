use serde_json::Value;
use tracing::info;

use super::decode_ack;
use super::request;
use super::send;
use super::Empty;
use super::StatefulEmitter;
use crate::Result;

/// True while the server has no admin account yet.
///
/// The acknowledgement is a bare boolean rather than an envelope.
pub async fn need_setup<E: StatefulEmitter + ?Sized>(client: &E) -> Result<bool> {
    let raw = send(client, "needSetup", Vec::new()).await?;
    decode_ack("needSetup", raw)
}

/// Creates the first admin account.
pub async fn setup<E: StatefulEmitter + ?Sized>(
    client: &E,
    username: &str,
    password: &str,
) -> Result<()> {
    let args = vec![Value::from(username), Value::from(password)];
    request::<_, Empty>(client, "setup", args).await?;
    info!(username, "Server setup completed");
    Ok(())
}
