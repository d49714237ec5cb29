//! Table operations: events and favorites.
//!
//! Filters are expressed in PostgREST query syntax (`column=eq.value`,
//! `order=column.asc`).

use crate::client::{EventsClient, REST_PATH};
use crate::error::Result;
use crate::models::{Event, Favorite, FavoriteRow};

/// Table holding event listings.
pub const EVENTS_TABLE: &str = "events";

/// Table holding `(user_id, event_id)` favorite pairs.
pub const FAVORITES_TABLE: &str = "favorites";

fn table_path(table: &str) -> String {
    format!("{}/{}", REST_PATH, table)
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

impl EventsClient {
    /// Fetches every event, sorted by start date ascending.
    ///
    /// Events without a start date come last.
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let events: Vec<Event> = self
            .get(
                &table_path(EVENTS_TABLE),
                &[("select", "*"), ("order", "date_start.asc.nullslast")],
            )
            .await?;
        tracing::debug!(count = events.len(), "fetched events");
        Ok(events)
    }

    /// Fetches the ids of the events a user marked as favorite.
    ///
    /// No rows yields an empty list.
    pub async fn list_favorites(&self, user_id: &str) -> Result<Vec<String>> {
        let user_filter = eq(user_id);
        let rows: Vec<FavoriteRow> = self
            .get(
                &table_path(FAVORITES_TABLE),
                &[("select", "event_id"), ("user_id", user_filter.as_str())],
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.event_id).collect())
    }

    /// Records `event_id` as a favorite of `user_id`.
    pub async fn add_favorite(&self, user_id: &str, event_id: &str) -> Result<()> {
        let favorite = Favorite::new(user_id, event_id);
        let no_query: [(&str, &str); 0] = [];
        self.post_no_content(&table_path(FAVORITES_TABLE), &no_query, &favorite)
            .await
    }

    /// Removes the `(user_id, event_id)` favorite pair.
    ///
    /// Removing a pair that does not exist succeeds.
    pub async fn remove_favorite(&self, user_id: &str, event_id: &str) -> Result<()> {
        let user_filter = eq(user_id);
        let event_filter = eq(event_id);
        self.delete(
            &table_path(FAVORITES_TABLE),
            &[
                ("user_id", user_filter.as_str()),
                ("event_id", event_filter.as_str()),
            ],
        )
        .await
    }
}
