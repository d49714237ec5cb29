//! Favorite command implementation.
//!
//! Toggles an event in or out of the signed-in user's favorites.

use sp_events_core::FavoriteToggle;

use super::list::{self, ListOptions};
use super::show::resolve_event;
use super::{flush_notifications, open_browser, Backend, CommandContext, Result};
use crate::output::format_toggle_json;

/// Options for the favorite command.
#[derive(Debug)]
pub struct FavoriteOptions {
    /// Event ID (full ID or prefix).
    pub event_id: String,
}

/// Executes the favorite command.
///
/// # Errors
///
/// Returns an error if no user is signed in, the id matches no single event,
/// or the backend rejected the change.
pub async fn execute(
    ctx: &CommandContext,
    opts: &FavoriteOptions,
    backend: &Backend,
) -> Result<()> {
    let mut browser = open_browser(ctx, backend).await?;
    let event = resolve_event(&browser.state().events, &opts.event_id)?.clone();

    let toggle = browser.toggle_favorite(&event.id).await?;
    tracing::debug!(event_id = %event.id, ?toggle, "favorite toggled");

    if ctx.json_output && toggle != FavoriteToggle::Failed {
        println!(
            "{}",
            format_toggle_json(&event, toggle, &browser.state().favorites)?
        );
    }
    flush_notifications(ctx, &mut browser)
}

/// Lists the signed-in user's favorite events.
pub async fn execute_list(ctx: &CommandContext, backend: &Backend) -> Result<()> {
    list::execute(ctx, &ListOptions::favorites_only(), backend).await
}
