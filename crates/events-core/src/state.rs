//! Immutable browse-state snapshots and the pure reducer that advances them.
//!
//! Every change to what the user sees goes through [`AppState::reduce`]: the
//! caller performs any remote work first, then dispatches the [`Action`]
//! describing its outcome. A snapshot is never mutated in place.

use serde::Serialize;
use sp_events_api::models::{AuthUser, Event};

use crate::favorites::FavoriteSet;
use crate::filter::{EventFilter, FilterSpec};
use crate::notify::Notification;
use crate::session::SessionState;

/// Everything the events screen renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    /// Identity lookup status.
    pub session: SessionState,

    /// All events, sorted by start date as delivered by the store.
    pub events: Vec<Event>,

    /// The signed-in user's favorites.
    pub favorites: FavoriteSet,

    /// Current filter criteria.
    pub filter: FilterSpec,

    /// True until the first event fetch has finished.
    pub loading: bool,

    /// Notifications not yet shown, oldest first.
    pub notifications: Vec<Notification>,
}

/// An outcome to fold into the state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The identity lookup finished.
    SessionResolved(Option<AuthUser>),
    /// An event fetch started.
    LoadStarted,
    /// Events arrived from the store.
    EventsLoaded(Vec<Event>),
    /// The event fetch failed.
    EventsFailed,
    /// Favorites arrived from the store.
    FavoritesLoaded(FavoriteSet),
    /// The favorites fetch failed.
    FavoritesFailed,
    /// The store recorded a new favorite.
    FavoriteAdded(String),
    /// The store dropped a favorite.
    FavoriteRemoved(String),
    /// A favorite toggle failed remotely.
    FavoriteFailed,
    /// The user changed the filter criteria.
    FilterChanged(FilterSpec),
    /// The user reset every criterion.
    FiltersCleared,
    /// The user signed out.
    SignedOut,
    /// Pending notifications were shown.
    NotificationsShown,
}

impl AppState {
    /// Returns the initial snapshot: identity unknown, nothing loaded.
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Returns the snapshot that follows `action`.
    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::SessionResolved(user) => Self {
                session: SessionState::from(user),
                ..self
            },
            Action::LoadStarted => Self {
                loading: true,
                ..self
            },
            Action::EventsLoaded(events) => Self {
                events,
                loading: false,
                ..self
            },
            Action::EventsFailed => Self {
                events: Vec::new(),
                loading: false,
                ..self
            }
            .notify(Notification::events_failed()),
            Action::FavoritesLoaded(favorites) => Self { favorites, ..self },
            Action::FavoritesFailed => Self {
                favorites: FavoriteSet::new(),
                ..self
            },
            Action::FavoriteAdded(event_id) => Self {
                favorites: self.favorites.with(event_id),
                ..self
            }
            .notify(Notification::favorite_added()),
            Action::FavoriteRemoved(event_id) => Self {
                favorites: self.favorites.without(&event_id),
                ..self
            }
            .notify(Notification::favorite_removed()),
            Action::FavoriteFailed => self.notify(Notification::favorite_failed()),
            Action::FilterChanged(filter) => Self { filter, ..self },
            Action::FiltersCleared => Self {
                filter: FilterSpec::cleared(),
                ..self
            },
            Action::SignedOut => Self {
                session: SessionState::SignedOut,
                loading: false,
                ..Self::default()
            },
            Action::NotificationsShown => Self {
                notifications: Vec::new(),
                ..self
            },
        }
    }

    fn notify(mut self, notification: Notification) -> Self {
        self.notifications.push(notification);
        self
    }

    /// Events passing the current filter, in store order.
    pub fn visible_events(&self) -> Vec<&Event> {
        EventFilter::new(&self.filter).filter_events(&self.events)
    }

    /// Favorite events, in store order.
    pub fn favorite_events(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| self.favorites.contains(&event.id))
            .collect()
    }

    pub fn is_favorite(&self, event_id: &str) -> bool {
        self.favorites.contains(event_id)
    }

    /// True when nothing matches but some criterion is active, so the front
    /// end should offer to clear the filters.
    pub fn should_offer_clear(&self) -> bool {
        self.filter.has_active_filters() && self.visible_events().is_empty()
    }
}
