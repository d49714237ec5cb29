//! User-visible notifications raised by browse operations.

use serde::Serialize;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A short message for the user, shown once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notification {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }

    /// Events could not be fetched.
    pub fn events_failed() -> Self {
        Self::error("Failed to load events").with_description("Try again in a few moments")
    }

    /// An event became a favorite.
    pub fn favorite_added() -> Self {
        Self::info("Added to favorites")
    }

    /// An event stopped being a favorite.
    pub fn favorite_removed() -> Self {
        Self::info("Removed from favorites")
    }

    /// The favorite toggle failed remotely.
    pub fn favorite_failed() -> Self {
        Self::error("Failed to update favorites")
    }
}
