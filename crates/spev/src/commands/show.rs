//! Show command implementation.
//!
//! Displays the details of one event.

use chrono::Utc;
use sp_events_api::models::Event;
use sp_events_core::{find_event, EventLookup};

use super::{open_browser, Backend, CommandContext, CommandError, Result};
use crate::output::helpers::truncate_id;
use crate::output::{format_event_details_json, format_event_details_table};

/// Options for the show command.
#[derive(Debug)]
pub struct ShowOptions {
    /// Event ID (full ID or prefix).
    pub event_id: String,
}

/// Executes the show command.
///
/// # Errors
///
/// Returns an error if no user is signed in or the id matches no single event.
pub async fn execute(ctx: &CommandContext, opts: &ShowOptions, backend: &Backend) -> Result<()> {
    let browser = open_browser(ctx, backend).await?;
    let state = browser.state();
    let event = resolve_event(&state.events, &opts.event_id)?;

    if ctx.json_output {
        println!("{}", format_event_details_json(event, &state.favorites)?);
    } else {
        print!(
            "{}",
            format_event_details_table(event, &state.favorites, ctx, Utc::now())
        );
    }
    Ok(())
}

/// Resolves an id or unique id prefix to an event.
pub fn resolve_event<'a>(events: &'a [Event], id_or_prefix: &str) -> Result<&'a Event> {
    match find_event(events, id_or_prefix) {
        EventLookup::Found(event) => Ok(event),
        EventLookup::Ambiguous(ids) => {
            let shown: Vec<String> = ids.iter().map(|id| truncate_id(id)).collect();
            Err(CommandError::NotFound(format!(
                "Event ID '{}' is ambiguous, it matches: {}",
                id_or_prefix,
                shown.join(", ")
            )))
        }
        EventLookup::NotFound => Err(CommandError::NotFound(format!(
            "No event found with ID '{}'",
            id_or_prefix
        ))),
    }
}
