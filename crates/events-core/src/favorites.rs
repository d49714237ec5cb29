//! The signed-in user's favorite event ids.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A set of favorite event ids.
///
/// Membership only: no event id appears twice and iteration is sorted. The
/// set is a value; `with` and `without` return updated copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: BTreeSet<String>,
}

impl FavoriteSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `event_id` is a favorite.
    pub fn contains(&self, event_id: &str) -> bool {
        self.ids.contains(event_id)
    }

    /// Returns a copy with `event_id` added.
    pub fn with(&self, event_id: impl Into<String>) -> Self {
        let mut ids = self.ids.clone();
        ids.insert(event_id.into());
        Self { ids }
    }

    /// Returns a copy with `event_id` removed.
    pub fn without(&self, event_id: &str) -> Self {
        let mut ids = self.ids.clone();
        ids.remove(event_id);
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over the ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
