//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the spev CLI.

use clap::{Parser, Subcommand, ValueEnum};

/// spev - Discover cultural events in São Paulo
#[derive(Parser, Debug)]
#[command(name = "spev")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Backend project URL (default: from config/env)
    #[arg(long, global = true, env = "SPEV_URL")]
    pub url: Option<String>,

    /// Backend public API key (default: from config/env)
    #[arg(long, global = true, env = "SPEV_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List events
    #[command(alias = "ls")]
    List {
        /// Text to look for in title, description or organizer
        #[arg(short, long)]
        search: Option<String>,

        /// Only events of this category ("Todos" for all)
        #[arg(short, long)]
        category: Option<String>,

        /// Text to look for in the location
        #[arg(short, long)]
        location: Option<String>,

        /// Minimum price in BRL
        #[arg(long)]
        price_min: Option<f64>,

        /// Maximum price in BRL
        #[arg(long)]
        price_max: Option<f64>,

        /// Starting on or after this date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        from: Option<String>,

        /// Starting on or before this date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        to: Option<String>,

        /// Show only favorite events
        #[arg(long)]
        favorites: bool,

        /// Limit results (default: 50)
        #[arg(long, default_value = "50")]
        limit: u32,

        /// Show all events (no limit)
        #[arg(long)]
        all: bool,
    },

    /// Show event details
    Show {
        /// Event ID (full ID or unique prefix)
        event_id: String,
    },

    /// Add or remove an event from favorites
    #[command(alias = "fav")]
    Favorite {
        /// Event ID (full ID or unique prefix)
        event_id: String,
    },

    /// List favorite events
    Favorites,

    /// List event categories
    Categories,

    /// Sign in with email and password
    Login {
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Account password (prompted when omitted)
        #[arg(long, env = "SPEV_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. url, session_storage, output.color)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,

    /// Open config file in $EDITOR
    Edit,
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
