use crate::StateError;

/// A value that may not have been received from the server yet.
///
/// `Unset` means "never received", which is distinct from having received a
/// falsy or empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence<T> {
    Unset,
    Value(T),
}

impl<T> Default for Presence<T> {
    fn default() -> Self {
        Presence::Unset
    }
}

impl<T> Presence<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Presence::Value(_))
    }

    /// Borrows the value, or `NotSetYet` if it was never received.
    pub fn get(&self) -> std::result::Result<&T, StateError> {
        match self {
            Presence::Value(v) => Ok(v),
            Presence::Unset => Err(StateError::NotSetYet),
        }
    }

    pub fn get_mut(&mut self) -> std::result::Result<&mut T, StateError> {
        match self {
            Presence::Value(v) => Ok(v),
            Presence::Unset => Err(StateError::NotSetYet),
        }
    }

    pub fn set(
        &mut self,
        value: T,
    ) {
        *self = Presence::Value(value);
    }

    /// Sets the value on first use and returns it for mutation.
    pub fn get_or_insert_with(
        &mut self,
        f: impl FnOnce() -> T,
    ) -> &mut T {
        if !self.is_set() {
            *self = Presence::Value(f());
        }
        match self {
            Presence::Value(v) => v,
            Presence::Unset => unreachable!("presence was just set"),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Presence::Value(v) => Some(v),
            Presence::Unset => None,
        }
    }
}

impl<T> From<Option<T>> for Presence<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Presence::Value(v),
            None => Presence::Unset,
        }
    }
}
