//! Command implementations for the spev CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod auth;
pub mod categories;
pub mod completions;
pub mod config;
pub mod favorite;
pub mod keyring;
pub mod list;
pub mod session;
pub mod show;

use std::io::IsTerminal;

use chrono_tz::Tz;
use sp_events_api::client::EventsClient;
use sp_events_core::filter::{parse_time_zone, FilterError, DEFAULT_TIME_ZONE};
use sp_events_core::{BrowserError, EventBrowser, Notification, Route};

use crate::cli::Cli;
use crate::output::{print_notifications, DateFormat};
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Browse error (not signed in, invalid filter).
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// Filter criteria error.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// API error.
    #[error("API error: {0}")]
    Api(#[from] sp_events_api::error::Error),

    /// The backend reported a failure that was already shown to the user.
    #[error("{0}")]
    Remote(String),

    /// Lookup failed for user-provided input.
    #[error("{0}")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Time zone for calendar dates in input and output.
    pub time_zone: Tz,
    /// How to render event dates.
    pub date_format: DateFormat,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
            time_zone: DEFAULT_TIME_ZONE,
            date_format: DateFormat::default(),
        }
    }

    /// Applies output preferences from the config file.
    ///
    /// Command line flags win: `--no-color` cannot be undone by the config.
    pub fn with_config(mut self, config: &Config) -> Result<Self> {
        if config.output.color == Some(false) {
            self.use_colors = false;
        }
        if let Some(format) = &config.output.date_format {
            self.date_format = format.parse().map_err(CommandError::Config)?;
        }
        if let Some(name) = &config.timezone {
            self.time_zone = parse_time_zone(name)?;
        }
        Ok(self)
    }

    /// Returns true if prompts can be shown.
    pub fn is_interactive(&self) -> bool {
        !self.json_output && std::io::stdin().is_terminal()
    }
}

/// Backend settings resolved from flags, environment and config.
#[derive(Debug)]
pub struct Backend {
    /// Project URL.
    pub url: String,
    /// Public API key.
    pub api_key: String,
    /// The loaded config file.
    pub config: Config,
}

impl Backend {
    /// Creates a client without a user session.
    pub fn anonymous_client(&self) -> Result<EventsClient> {
        Ok(EventsClient::new(&self.url, &self.api_key)?)
    }
}

/// Opens a browser for the stored session and loads events and favorites.
///
/// Fails with [`BrowserError::SignInRequired`] when no usable session exists.
pub async fn open_browser(
    ctx: &CommandContext,
    backend: &Backend,
) -> Result<EventBrowser<EventsClient>> {
    let client = session::signed_in_client(backend).await?;
    let mut browser = EventBrowser::new(client);

    if browser.resolve_session().await == Route::Login {
        return Err(BrowserError::SignInRequired.into());
    }
    browser.load().await?;
    flush_notifications(ctx, &mut browser)?;
    Ok(browser)
}

/// Prints pending notifications and fails if any of them was an error.
pub fn flush_notifications(
    ctx: &CommandContext,
    browser: &mut EventBrowser<EventsClient>,
) -> Result<()> {
    let notifications = browser.take_notifications();
    print_notifications(&notifications, ctx);
    first_error(&notifications)
}

fn first_error(notifications: &[Notification]) -> Result<()> {
    match notifications.iter().find(|n| n.is_error()) {
        Some(n) => Err(CommandError::Remote(n.title.clone())),
        None => Ok(()),
    }
}
