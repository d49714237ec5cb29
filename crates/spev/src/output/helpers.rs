//! Common helper functions for output formatting.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use sp_events_api::models::Event;

/// Width of the shortened id column.
pub const ID_WIDTH: usize = 8;

/// How event dates are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// "Today 20:00", "Sat 21:30", "3 days ago".
    #[default]
    Relative,
    /// "2025-05-10T20:00-03:00".
    Iso,
    /// "10/05 20:00".
    Short,
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relative" => Ok(Self::Relative),
            "iso" => Ok(Self::Iso),
            "short" => Ok(Self::Short),
            other => Err(format!(
                "Invalid date_format value '{}'. Valid values: relative, iso, short",
                other
            )),
        }
    }
}

/// Truncates an ID for display.
pub fn truncate_id(id: &str) -> String {
    id.chars().take(ID_WIDTH).collect()
}

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

/// Formats an event's price range in BRL.
///
/// No price at all, or a zero minimum, reads as free.
pub fn format_price(event: &Event) -> String {
    if event.has_no_price() {
        return "Free".to_string();
    }
    let min = event.price_min.filter(|p| *p > 0.0);
    let max = event.price_max.filter(|p| *p > 0.0);
    match (event.price_min, min, max) {
        (Some(_), None, _) | (None, None, None) => "Free".to_string(),
        (_, Some(low), Some(high)) if low == high => format!("R$ {}", low),
        (_, Some(low), Some(high)) => format!("R$ {} - R$ {}", low, high),
        (_, Some(low), None) => format!("From R$ {}", low),
        (None, None, Some(high)) => format!("Up to R$ {}", high),
    }
}

/// Formats an event's start for display at `now`.
///
/// An unparsable timestamp is shown as stored.
pub fn format_event_date(
    event: &Event,
    format: DateFormat,
    tz: Tz,
    now: DateTime<Utc>,
) -> String {
    let Some(start) = event.starts_at() else {
        return match event.date_start.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.to_string(),
            _ => "TBA".to_string(),
        };
    };
    let local = start.with_timezone(&tz);

    match format {
        DateFormat::Iso => local.format("%Y-%m-%dT%H:%M%:z").to_string(),
        DateFormat::Short => local.format("%d/%m %H:%M").to_string(),
        DateFormat::Relative => {
            let today = now.with_timezone(&tz).date_naive();
            let day = local.date_naive();
            let time = local.format("%H:%M");
            let days = (day - today).num_days();
            match days {
                0 => format!("Today {}", time),
                1 => format!("Tomorrow {}", time),
                -1 => "Yesterday".to_string(),
                2..=6 => format!("{} {}", local.format("%a"), time),
                d if d < 0 => format!("{} days ago", -d),
                _ => format!("{} {}", local.format("%b %d"), time),
            }
        }
    }
}

/// Marker for favorite events.
pub fn favorite_marker(is_favorite: bool, use_colors: bool) -> String {
    match (is_favorite, use_colors) {
        (false, _) => String::new(),
        (true, true) => "♥".red().to_string(),
        (true, false) => "♥".to_string(),
    }
}

/// Badge shown next to sponsored events.
pub fn sponsored_badge(is_sponsored: bool, use_colors: bool) -> String {
    match (is_sponsored, use_colors) {
        (false, _) => String::new(),
        (true, true) => format!(" {}", "[sponsored]".yellow()),
        (true, false) => " [sponsored]".to_string(),
    }
}
