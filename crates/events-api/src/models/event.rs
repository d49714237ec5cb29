//! Event model.
//!
//! One row of the `events` table. Only `id` and `title` are guaranteed; every
//! other column may be null.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cultural event listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The unique identifier for the event.
    pub id: String,

    /// The event title.
    pub title: String,

    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Start date/time as stored by the backend (ISO-8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_start: Option<String>,

    /// Venue, neighbourhood or address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Cheapest ticket price in BRL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,

    /// Most expensive ticket price in BRL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,

    /// Category label (loosely drawn from a fixed set, not enforced).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Name of the organizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,

    /// Whether the listing is sponsored.
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_sponsored: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl Event {
    /// Creates an event with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            date_start: None,
            location: None,
            price_min: None,
            price_max: None,
            category: None,
            image_url: None,
            organizer: None,
            is_sponsored: false,
        }
    }

    /// Returns the parsed start instant, or `None` when absent or unparsable.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.date_start.as_deref().and_then(parse_timestamp)
    }

    /// Returns true if the event lists no price at all.
    pub fn has_no_price(&self) -> bool {
        self.price_min.is_none() && self.price_max.is_none()
    }
}

/// Parses a backend timestamp.
///
/// Accepts ISO 8601 date-times with or without seconds, with an extended
/// (`-03:00`), basic (`-0300`), short (`+00`) or `Z` offset, and with a `T`
/// or space separator. Offset-less date-times (`timestamp` columns) and bare
/// dates are read as UTC, a bare date at midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let with_offset = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok());
    if let Some(dt) = with_offset {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
