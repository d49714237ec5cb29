//! List command implementation.
//!
//! Fetches events and the user's favorites, then narrows them with the
//! filter criteria given on the command line.

use chrono::Utc;
use chrono_tz::Tz;
use sp_events_api::models::Event;
use sp_events_core::filter::{
    is_known_category, parse_date_from, parse_date_to, suggest_category, EventFilter,
};
use sp_events_core::{AppState, EventBrowser, EventStore};

use super::{open_browser, Backend, CommandContext, Result};
use crate::output::{format_events_json, format_events_table};

/// Options for the list command.
#[derive(Debug, Default)]
pub struct ListOptions {
    /// Text to look for in title, description or organizer.
    pub search: Option<String>,
    /// Category label.
    pub category: Option<String>,
    /// Text to look for in the location.
    pub location: Option<String>,
    /// Lower price bound.
    pub price_min: Option<f64>,
    /// Upper price bound.
    pub price_max: Option<f64>,
    /// Earliest start date.
    pub from: Option<String>,
    /// Latest start date.
    pub to: Option<String>,
    /// Show only favorite events.
    pub favorites: bool,
    /// Limit results.
    pub limit: u32,
    /// Show all events (no limit).
    pub all: bool,
}

impl ListOptions {
    /// Options that list every favorite event.
    pub fn favorites_only() -> Self {
        Self {
            favorites: true,
            all: true,
            ..Self::default()
        }
    }
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if no user is signed in, a filter value is invalid, or
/// events could not be loaded.
pub async fn execute(ctx: &CommandContext, opts: &ListOptions, backend: &Backend) -> Result<()> {
    let mut browser = open_browser(ctx, backend).await?;

    if let Some(hint) = opts.category.as_deref().and_then(category_hint) {
        if !ctx.quiet && !ctx.json_output {
            eprintln!("{}", hint);
        }
    }
    apply_filters(&mut browser, opts, ctx.time_zone)?;

    let state = browser.state();
    let matching = select_events(state, opts.favorites);
    let total = matching.len();
    let shown = apply_limit(matching, opts);

    if ctx.json_output {
        println!(
            "{}",
            format_events_json(&shown, total, &state.favorites, &state.filter)?
        );
        return Ok(());
    }

    print!(
        "{}",
        format_events_table(&shown, &state.favorites, ctx, Utc::now())
    );
    if !ctx.quiet {
        if shown.len() < total {
            eprintln!("Showing {} of {} events (use --all to see every one)", shown.len(), total);
        } else if total > 0 {
            eprintln!("{} {} found", total, if total == 1 { "event" } else { "events" });
        }
        if state.should_offer_clear() {
            eprintln!("No events match these filters. Run 'spev list' without filters to see all events.");
        }
    }

    Ok(())
}

/// Applies the command line criteria to the browser's filter.
pub fn apply_filters<S: EventStore>(
    browser: &mut EventBrowser<S>,
    opts: &ListOptions,
    tz: Tz,
) -> Result<()> {
    if let Some(search) = &opts.search {
        browser.set_search(search.as_str());
    }
    if let Some(category) = &opts.category {
        browser.set_category(category.trim());
    }
    if let Some(location) = &opts.location {
        browser.set_location(location.as_str());
    }
    if opts.price_min.is_some() || opts.price_max.is_some() {
        browser.set_price_range(opts.price_min.unwrap_or(0.0), opts.price_max)?;
    }
    if opts.from.is_some() || opts.to.is_some() {
        let from = opts
            .from
            .as_deref()
            .map(|raw| parse_date_from(raw, tz))
            .transpose()?;
        let to = opts
            .to
            .as_deref()
            .map(|raw| parse_date_to(raw, tz))
            .transpose()?;
        browser.set_dates(from, to)?;
    }
    Ok(())
}

/// Events passing the filter, restricted to favorites when asked.
pub fn select_events(state: &AppState, favorites_only: bool) -> Vec<&Event> {
    if !favorites_only {
        return state.visible_events();
    }
    let filter = EventFilter::new(&state.filter);
    state
        .favorite_events()
        .into_iter()
        .filter(|event| filter.matches(event))
        .collect()
}

fn apply_limit<'a>(events: Vec<&'a Event>, opts: &ListOptions) -> Vec<&'a Event> {
    if opts.all {
        events
    } else {
        events.into_iter().take(opts.limit as usize).collect()
    }
}

/// Hint for a category label that matches no known category.
fn category_hint(label: &str) -> Option<String> {
    let label = label.trim();
    if label.is_empty() || is_known_category(label) {
        return None;
    }
    Some(match suggest_category(label) {
        Some(suggestion) => format!(
            "Unknown category '{}'. Did you mean '{}'?",
            label, suggestion
        ),
        None => format!(
            "Unknown category '{}'. Run 'spev categories' to see the known ones.",
            label
        ),
    })
}
