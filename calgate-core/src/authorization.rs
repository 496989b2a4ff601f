//! Calendar access authorization states.

use serde::{Deserialize, Serialize};

/// Authorization state of the calendar store, as reported by the platform.
///
/// The only transition this system ever requests is
/// `NotDetermined -> {Authorized, Denied}` via a single consent prompt.
/// `Restricted` is imposed by external policy and is never requested here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationState {
    NotDetermined,
    Authorized,
    Denied,
    Restricted,
}

impl AuthorizationState {
    /// Whether this state can no longer change through a consent prompt.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AuthorizationState::NotDetermined)
    }

    /// Whether calendar access is allowed in this state.
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthorizationState::Authorized)
    }
}
