//! Output formatting utilities for the spev CLI.
//!
//! - [`events`] - Event output formatting (list, show, favorite toggle)
//! - [`helpers`] - Common formatting utilities (truncation, prices, dates)

mod events;
pub mod helpers;

use owo_colors::OwoColorize;
use sp_events_core::{Notification, NotificationLevel};

use crate::commands::CommandContext;

pub use events::{
    format_event_details_json, format_event_details_table, format_events_json,
    format_events_table, format_toggle_json,
};
pub use helpers::DateFormat;

/// Renders a notification as a single line.
pub fn format_notification(notification: &Notification, use_colors: bool) -> String {
    let text = match &notification.description {
        Some(description) => format!("{}. {}", notification.title, description),
        None => notification.title.clone(),
    };
    match (notification.level, use_colors) {
        (NotificationLevel::Info, true) => format!("{} {}", "✓".green(), text),
        (NotificationLevel::Info, false) => format!("✓ {}", text),
        (NotificationLevel::Error, true) => format!("{} {}", "Error:".red().bold(), text),
        (NotificationLevel::Error, false) => format!("Error: {}", text),
    }
}

/// Prints notifications to stderr.
///
/// In JSON mode and quiet mode only errors are printed; JSON mode leaves
/// them to the error envelope.
pub fn print_notifications(notifications: &[Notification], ctx: &CommandContext) {
    if ctx.json_output {
        return;
    }
    for notification in notifications {
        if ctx.quiet && !notification.is_error() {
            continue;
        }
        eprintln!("{}", format_notification(notification, ctx.use_colors));
    }
}
