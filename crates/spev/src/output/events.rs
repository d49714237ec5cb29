//! Event output formatting.

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use sp_events_api::models::Event;
use sp_events_core::{FavoriteSet, FavoriteToggle, FilterSpec};

use crate::commands::CommandContext;

use super::helpers::{
    favorite_marker, format_event_date, format_price, sponsored_badge, truncate_id, truncate_str,
    ID_WIDTH,
};

/// JSON output structure for the list command.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub events: Vec<EventOutput<'a>>,
    /// Number of events that passed the filter, before any limit.
    pub total: usize,
    pub truncated: bool,
    pub filter: &'a FilterSpec,
}

/// JSON output structure for a single event.
#[derive(Serialize)]
pub struct EventOutput<'a> {
    pub id: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub date_start: Option<&'a str>,
    pub location: Option<&'a str>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<&'a str>,
    pub organizer: Option<&'a str>,
    pub is_sponsored: bool,
    pub is_favorite: bool,
}

impl<'a> EventOutput<'a> {
    fn new(event: &'a Event, favorites: &FavoriteSet, detailed: bool) -> Self {
        Self {
            id: &event.id,
            title: &event.title,
            description: event.description.as_deref().filter(|_| detailed),
            date_start: event.date_start.as_deref(),
            location: event.location.as_deref(),
            price_min: event.price_min,
            price_max: event.price_max,
            category: event.category.as_deref(),
            image_url: event.image_url.as_deref().filter(|_| detailed),
            organizer: event.organizer.as_deref(),
            is_sponsored: event.is_sponsored,
            is_favorite: favorites.contains(&event.id),
        }
    }
}

/// JSON output for a favorite toggle.
#[derive(Serialize)]
pub struct ToggleOutput<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub status: &'static str,
    pub is_favorite: bool,
}

/// Formats events as JSON.
pub fn format_events_json(
    events: &[&Event],
    total: usize,
    favorites: &FavoriteSet,
    filter: &FilterSpec,
) -> Result<String, serde_json::Error> {
    let output = ListOutput {
        events: events
            .iter()
            .map(|event| EventOutput::new(event, favorites, false))
            .collect(),
        total,
        truncated: events.len() < total,
        filter,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats events as a table.
pub fn format_events_table(
    events: &[&Event],
    favorites: &FavoriteSet,
    ctx: &CommandContext,
    now: DateTime<Utc>,
) -> String {
    if events.is_empty() {
        return "No events found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<8} {:<1} {:<18} {:<18} {:<10} {}",
        "ID", "", "Date", "Price", "Category", "Title"
    );
    if ctx.use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for event in events {
        let date = format_event_date(event, ctx.date_format, ctx.time_zone, now);
        let price = format_price(event);
        let category = truncate_str(event.category.as_deref().unwrap_or(""), 10);
        // Pad before coloring; escape codes would count toward the width.
        let marker = if favorites.contains(&event.id) {
            favorite_marker(true, ctx.use_colors)
        } else {
            " ".to_string()
        };

        output.push_str(&format!(
            "{:<width$} {} {:<18} {:<18} {:<10} {}{}\n",
            truncate_id(&event.id),
            marker,
            truncate_str(&date, 18),
            truncate_str(&price, 18),
            category,
            event.title,
            sponsored_badge(event.is_sponsored, ctx.use_colors),
            width = ID_WIDTH,
        ));
    }

    output
}

/// Formats event details as JSON (show command).
pub fn format_event_details_json(
    event: &Event,
    favorites: &FavoriteSet,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&EventOutput::new(event, favorites, true))
}

/// Formats event details as a human-readable block (show command).
pub fn format_event_details_table(
    event: &Event,
    favorites: &FavoriteSet,
    ctx: &CommandContext,
    now: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    let title_label = if ctx.use_colors {
        "Event:".bold().to_string()
    } else {
        "Event:".to_string()
    };
    output.push_str(&format!(
        "{} {}{}\n",
        title_label,
        event.title,
        sponsored_badge(event.is_sponsored, ctx.use_colors)
    ));
    output.push_str(&format!("ID: {}\n", event.id));
    output.push_str(&format!(
        "Date: {}\n",
        format_event_date(event, ctx.date_format, ctx.time_zone, now)
    ));
    if let Some(ref location) = event.location {
        output.push_str(&format!("Location: {}\n", location));
    }
    output.push_str(&format!("Price: {}\n", format_price(event)));
    if let Some(ref category) = event.category {
        output.push_str(&format!("Category: {}\n", category));
    }
    if let Some(ref organizer) = event.organizer {
        output.push_str(&format!("Organizer: {}\n", organizer));
    }
    if favorites.contains(&event.id) {
        output.push_str(&format!(
            "Favorite: {}\n",
            favorite_marker(true, ctx.use_colors)
        ));
    }
    if let Some(ref image_url) = event.image_url {
        output.push_str(&format!("Image: {}\n", image_url));
    }
    if let Some(description) = event.description.as_deref().filter(|d| !d.trim().is_empty()) {
        output.push_str("Description:\n");
        for line in description.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    output
}

/// Formats the outcome of a favorite toggle as JSON.
pub fn format_toggle_json(
    event: &Event,
    toggle: FavoriteToggle,
    favorites: &FavoriteSet,
) -> Result<String, serde_json::Error> {
    let status = match toggle {
        FavoriteToggle::Added => "added",
        FavoriteToggle::Removed => "removed",
        FavoriteToggle::Failed => "failed",
    };
    serde_json::to_string_pretty(&ToggleOutput {
        id: &event.id,
        title: &event.title,
        status,
        is_favorite: favorites.contains(&event.id),
    })
}
