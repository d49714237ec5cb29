//! Favorite model.

use serde::{Deserialize, Serialize};

/// A user-to-event marking, one row of the `favorites` table.
///
/// The pair `(user_id, event_id)` is unique in the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Favorite {
    /// The user who marked the event.
    pub user_id: String,

    /// The marked event.
    pub event_id: String,
}

impl Favorite {
    /// Creates a favorite pair.
    pub fn new(user_id: impl Into<String>, event_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            event_id: event_id.into(),
        }
    }
}

/// Projection returned by `select=event_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FavoriteRow {
    pub event_id: String,
}
