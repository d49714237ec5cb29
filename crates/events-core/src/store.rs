//! The event/favorite store seen by the browse controller.
//!
//! [`EventStore`] is the narrow surface the controller needs. The hosted
//! backend client implements it directly; [`MemoryStore`] keeps everything in
//! process and can be told to fail, which is how the error paths are tested.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use sp_events_api::client::EventsClient;
use sp_events_api::error::{ApiError, Error, Result};
use sp_events_api::models::{AuthUser, Event};

use crate::favorites::FavoriteSet;

/// Access to events, favorites and the current identity.
#[allow(async_fn_in_trait)]
pub trait EventStore {
    /// The signed-in user, or `None` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<AuthUser>>;

    /// All events, sorted by start date ascending.
    async fn list_events(&self) -> Result<Vec<Event>>;

    /// The favorite event ids of `user_id`; empty when there are none.
    async fn list_favorites(&self, user_id: &str) -> Result<FavoriteSet>;

    async fn add_favorite(&self, user_id: &str, event_id: &str) -> Result<()>;

    async fn remove_favorite(&self, user_id: &str, event_id: &str) -> Result<()>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<()>;
}

impl EventStore for EventsClient {
    async fn current_user(&self) -> Result<Option<AuthUser>> {
        if self.access_token().is_none() {
            return Ok(None);
        }
        match self.get_user().await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_auth() => {
                tracing::debug!(error = %e, "access token rejected, treating as signed out");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        EventsClient::list_events(self).await
    }

    async fn list_favorites(&self, user_id: &str) -> Result<FavoriteSet> {
        let ids = EventsClient::list_favorites(self, user_id).await?;
        Ok(ids.into_iter().collect())
    }

    async fn add_favorite(&self, user_id: &str, event_id: &str) -> Result<()> {
        EventsClient::add_favorite(self, user_id, event_id).await
    }

    async fn remove_favorite(&self, user_id: &str, event_id: &str) -> Result<()> {
        EventsClient::remove_favorite(self, user_id, event_id).await
    }

    async fn sign_out(&self) -> Result<()> {
        EventsClient::sign_out(self).await
    }
}

/// Store operations that [`MemoryStore`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    CurrentUser,
    ListEvents,
    ListFavorites,
    AddFavorite,
    RemoveFavorite,
    SignOut,
}

#[derive(Debug, Default)]
struct MemoryData {
    user: Option<AuthUser>,
    events: Vec<Event>,
    favorites: HashSet<(String, String)>,
    failing: HashSet<StoreOp>,
    calls: Vec<StoreOp>,
}

/// In-process store.
///
/// Events are returned sorted by start date like the hosted table. Every
/// call is recorded, and calls to an operation marked with
/// [`MemoryStore::fail_on`] return a network error without touching data.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the signed-in user.
    pub fn with_user(self, user: AuthUser) -> Self {
        self.lock().user = Some(user);
        self
    }

    /// Adds events to the catalogue.
    pub fn with_events(self, events: impl IntoIterator<Item = Event>) -> Self {
        self.lock().events.extend(events);
        self
    }

    /// Records a favorite pair.
    pub fn with_favorite(self, user_id: &str, event_id: &str) -> Self {
        self.lock()
            .favorites
            .insert((user_id.to_string(), event_id.to_string()));
        self
    }

    /// Makes every later call to `op` fail.
    pub fn fail_on(&self, op: StoreOp) {
        self.lock().failing.insert(op);
    }

    /// Makes `op` succeed again.
    pub fn recover(&self, op: StoreOp) {
        self.lock().failing.remove(&op);
    }

    /// Operations called so far, in order.
    pub fn calls(&self) -> Vec<StoreOp> {
        self.lock().calls.clone()
    }

    /// Returns true if the pair is recorded.
    pub fn has_favorite(&self, user_id: &str, event_id: &str) -> bool {
        self.lock()
            .favorites
            .contains(&(user_id.to_string(), event_id.to_string()))
    }

    fn lock(&self) -> MutexGuard<'_, MemoryData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, op: StoreOp) -> Result<MutexGuard<'_, MemoryData>> {
        let mut data = self.lock();
        data.calls.push(op);
        if data.failing.contains(&op) {
            return Err(Error::Api(ApiError::Network {
                message: format!("injected failure for {:?}", op),
            }));
        }
        Ok(data)
    }
}

impl EventStore for MemoryStore {
    async fn current_user(&self) -> Result<Option<AuthUser>> {
        Ok(self.begin(StoreOp::CurrentUser)?.user.clone())
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let data = self.begin(StoreOp::ListEvents)?;
        let mut events = data.events.clone();
        // Undated events sort last, as with `nullslast`.
        events.sort_by_key(|event| (event.starts_at().is_none(), event.starts_at()));
        Ok(events)
    }

    async fn list_favorites(&self, user_id: &str) -> Result<FavoriteSet> {
        let data = self.begin(StoreOp::ListFavorites)?;
        Ok(data
            .favorites
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, event_id)| event_id.clone())
            .collect())
    }

    async fn add_favorite(&self, user_id: &str, event_id: &str) -> Result<()> {
        let mut data = self.begin(StoreOp::AddFavorite)?;
        let inserted = data
            .favorites
            .insert((user_id.to_string(), event_id.to_string()));
        if !inserted {
            return Err(Error::Api(ApiError::Conflict {
                message: "duplicate key value violates unique constraint".to_string(),
            }));
        }
        Ok(())
    }

    async fn remove_favorite(&self, user_id: &str, event_id: &str) -> Result<()> {
        let mut data = self.begin(StoreOp::RemoveFavorite)?;
        data.favorites
            .remove(&(user_id.to_string(), event_id.to_string()));
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        self.begin(StoreOp::SignOut)?.user = None;
        Ok(())
    }
}
