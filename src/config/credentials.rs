use serde::Deserialize;

use crate::Error;
use crate::Result;

/// Login material. Leaving everything empty relies on the server's
/// auto-login.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Two-factor token sent along with username and password
    #[serde(default)]
    pub token: Option<String>,

    /// Session token for `loginByToken`
    #[serde(default)]
    pub jwt: Option<String>,
}

impl CredentialsConfig {
    pub fn validate(&self) -> Result<()> {
        match (&self.username, &self.password) {
            (Some(_), None) | (None, Some(_)) => Err(Error::InvalidConfig(
                "credentials.username and credentials.password must be set together".into(),
            )),
            _ => Ok(()),
        }
    }
}
