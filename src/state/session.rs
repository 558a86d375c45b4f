use super::State;
use crate::Result;

impl State {
    pub fn connected(&self) -> Result<bool> {
        self.read(|state| Ok(*state.connected.get()?))
    }

    pub fn set_connected(
        &self,
        connected: bool,
    ) -> Result<()> {
        self.write(|state| state.connected.set(connected))
    }

    /// Always known; starts out false.
    pub fn logged_in(&self) -> Result<bool> {
        self.read(|state| Ok(state.logged_in))
    }

    pub fn set_logged_in(
        &self,
        logged_in: bool,
    ) -> Result<()> {
        self.write(|state| state.logged_in = logged_in)
    }

    pub fn auto_login(&self) -> Result<bool> {
        self.read(|state| Ok(*state.auto_login.get()?))
    }

    pub fn set_auto_login(
        &self,
        auto_login: bool,
    ) -> Result<()> {
        self.write(|state| state.auto_login.set(auto_login))
    }
}
