//! Browse controller tying the store to the state reducer.
//!
//! [`EventBrowser`] owns the current [`AppState`] snapshot. Each operation
//! awaits the store first and then folds the outcome into a new snapshot, so
//! a failed remote call never leaves local state half-updated.
//!
//! Store failures are not returned as errors. Following the product's error
//! policy they are logged and, where the user needs to know, surfaced as
//! [`Notification`]s on the snapshot:
//!
//! | failure | notification | state |
//! |---|---|---|
//! | listing events | yes | empty event list |
//! | listing favorites | no | empty favorite set |
//! | toggling a favorite | yes | unchanged |
//!
//! # Example
//!
//! ```
//! use sp_events_api::models::{AuthUser, Event};
//! use sp_events_core::{EventBrowser, FavoriteToggle, MemoryStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = MemoryStore::new()
//!     .with_user(AuthUser { id: "u1".into(), email: None })
//!     .with_events([Event::new("e1", "Jazz Night")]);
//!
//! let mut browser = EventBrowser::new(store);
//! browser.resolve_session().await;
//! browser.load().await.unwrap();
//!
//! assert_eq!(browser.toggle_favorite("e1").await.unwrap(), FavoriteToggle::Added);
//! assert!(browser.state().is_favorite("e1"));
//! # }
//! ```

use chrono::{DateTime, Utc};
use sp_events_api::models::AuthUser;

use crate::filter::{CategoryFilter, FilterError, FilterSpec, PriceRange};
use crate::notify::Notification;
use crate::session::{Route, SessionState};
use crate::state::{Action, AppState};
use crate::store::EventStore;

/// Errors from browse operations that the caller must act on.
///
/// Remote failures are reported through notifications instead.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    /// The operation needs a signed-in user.
    #[error("sign in required: run `spev login` first")]
    SignInRequired,

    /// The requested filter criteria are invalid.
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Result type for browse operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Outcome of [`EventBrowser::toggle_favorite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
    /// The store rejected the change; favorites are unchanged.
    Failed,
}

/// Drives the events screen against an [`EventStore`].
#[derive(Debug)]
pub struct EventBrowser<S> {
    store: S,
    state: AppState,
}

impl<S: EventStore> EventBrowser<S> {
    /// Creates a browser in the initial loading state.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: AppState::new(),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatch");
        self.state = std::mem::take(&mut self.state).reduce(action);
    }

    fn signed_in_user(&self) -> Result<AuthUser> {
        self.state
            .session
            .user()
            .cloned()
            .ok_or(BrowserError::SignInRequired)
    }

    /// Looks up the current identity and returns the screen to show.
    ///
    /// A failed lookup is treated as signed out.
    pub async fn resolve_session(&mut self) -> Route {
        let user = match self.store.current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "could not resolve session");
                None
            }
        };
        self.dispatch(Action::SessionResolved(user));
        // Resolved states always have a route.
        self.state.session.route().unwrap_or(Route::Login)
    }

    /// Fetches events and the user's favorites.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::SignInRequired`] if no user is signed in; no
    /// fetch is attempted in that case.
    pub async fn load(&mut self) -> Result<&AppState> {
        let user = self.signed_in_user()?;
        self.dispatch(Action::LoadStarted);

        match self.store.list_events().await {
            Ok(events) => {
                tracing::debug!(count = events.len(), "events loaded");
                self.dispatch(Action::EventsLoaded(events));
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load events");
                self.dispatch(Action::EventsFailed);
            }
        }

        match self.store.list_favorites(&user.id).await {
            Ok(favorites) => {
                tracing::debug!(count = favorites.len(), "favorites loaded");
                self.dispatch(Action::FavoritesLoaded(favorites));
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load favorites");
                self.dispatch(Action::FavoritesFailed);
            }
        }

        Ok(&self.state)
    }

    /// Adds or removes `event_id` from the favorites.
    ///
    /// The local set changes only once the store has accepted the change.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::SignInRequired`] if no user is signed in.
    pub async fn toggle_favorite(&mut self, event_id: &str) -> Result<FavoriteToggle> {
        let user = self.signed_in_user()?;

        if self.state.is_favorite(event_id) {
            match self.store.remove_favorite(&user.id, event_id).await {
                Ok(()) => {
                    self.dispatch(Action::FavoriteRemoved(event_id.to_string()));
                    Ok(FavoriteToggle::Removed)
                }
                Err(e) => {
                    tracing::error!(error = %e, event_id, "failed to remove favorite");
                    self.dispatch(Action::FavoriteFailed);
                    Ok(FavoriteToggle::Failed)
                }
            }
        } else {
            match self.store.add_favorite(&user.id, event_id).await {
                Ok(()) => {
                    self.dispatch(Action::FavoriteAdded(event_id.to_string()));
                    Ok(FavoriteToggle::Added)
                }
                Err(e) => {
                    tracing::error!(error = %e, event_id, "failed to add favorite");
                    self.dispatch(Action::FavoriteFailed);
                    Ok(FavoriteToggle::Failed)
                }
            }
        }
    }

    /// Replaces the filter criteria.
    pub fn update_filter(&mut self, filter: FilterSpec) -> &AppState {
        self.dispatch(Action::FilterChanged(filter));
        &self.state
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> &AppState {
        let filter = self.state.filter.clone().with_search(search);
        self.update_filter(filter)
    }

    pub fn set_category(&mut self, category: &str) -> &AppState {
        let filter = self
            .state
            .filter
            .clone()
            .with_category(CategoryFilter::parse(category));
        self.update_filter(filter)
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> &AppState {
        let filter = self.state.filter.clone().with_location(location);
        self.update_filter(filter)
    }

    /// # Errors
    ///
    /// Returns [`BrowserError::Filter`] for a negative or inverted range.
    pub fn set_price_range(&mut self, low: f64, high: Option<f64>) -> Result<&AppState> {
        let range = PriceRange::new(low, high)?;
        let filter = self.state.filter.clone().with_price_range(range);
        Ok(self.update_filter(filter))
    }

    /// # Errors
    ///
    /// Returns [`BrowserError::Filter`] if `from` is after `to`.
    pub fn set_dates(
        &mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<&AppState> {
        let filter = self.state.filter.clone().with_dates(from, to)?;
        Ok(self.update_filter(filter))
    }

    /// Resets every criterion to its neutral value.
    pub fn clear_filters(&mut self) -> &AppState {
        self.dispatch(Action::FiltersCleared);
        &self.state
    }

    /// Signs out at the store (best effort) and resets the snapshot.
    pub async fn sign_out(&mut self) -> Route {
        if let Err(e) = self.store.sign_out().await {
            tracing::warn!(error = %e, "remote sign out failed");
        }
        self.dispatch(Action::SignedOut);
        Route::Login
    }

    /// Returns pending notifications and clears them from the snapshot.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        let pending = self.state.notifications.clone();
        if !pending.is_empty() {
            self.dispatch(Action::NotificationsShown);
        }
        pending
    }

    /// True once the identity lookup has finished.
    pub fn is_resolved(&self) -> bool {
        !matches!(self.state.session, SessionState::Loading)
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
