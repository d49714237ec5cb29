//! Authentication state as seen by the browse flow.

use serde::Serialize;
use sp_events_api::models::AuthUser;

/// Where the identity lookup stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum SessionState {
    /// Identity not resolved yet.
    #[default]
    Loading,
    /// Resolved: nobody is signed in.
    SignedOut,
    /// Resolved: this user is signed in.
    SignedIn(AuthUser),
}

/// Screen the front end should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Events,
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            SessionState::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    /// The screen to show, or `None` while still loading.
    pub fn route(&self) -> Option<Route> {
        match self {
            SessionState::Loading => None,
            SessionState::SignedOut => Some(Route::Login),
            SessionState::SignedIn(_) => Some(Route::Events),
        }
    }
}

impl From<Option<AuthUser>> for SessionState {
    fn from(user: Option<AuthUser>) -> Self {
        match user {
            Some(user) => SessionState::SignedIn(user),
            None => SessionState::SignedOut,
        }
    }
}
