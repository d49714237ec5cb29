//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Local commands run without a backend; backend commands need the project
//! URL and API key resolved first.

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::auth::LoginOptions;
use crate::commands::favorite::FavoriteOptions;
use crate::commands::list::ListOptions;
use crate::commands::show::ShowOptions;
use crate::commands::{self, Backend, CommandContext, CommandError, Result};

/// Trait for commands that run without a backend.
#[allow(async_fn_in_trait)]
pub trait LocalCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that talk to the backend.
#[allow(async_fn_in_trait)]
pub trait BackendCommand {
    async fn execute(&self, ctx: &CommandContext, backend: &Backend) -> Result<()>;
}

/// Commands that don't need a backend.
#[derive(Debug)]
pub enum LocalDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Categories,
    Help,
}

impl<'a> LocalDispatch<'a> {
    /// Returns None if the command needs a backend.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            Some(Commands::Categories) => Some(Self::Categories),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl LocalCommand for LocalDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command).await,
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Categories => commands::categories::execute(ctx),
            Self::Help => {
                if !ctx.quiet {
                    println!("spev - Discover cultural events in São Paulo");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

async fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Edit) => commands::config::execute_edit(ctx).await,
    }
}

/// Commands that need a backend.
#[derive(Debug)]
pub enum BackendDispatch {
    List(ListOptions),
    Show(ShowOptions),
    Favorite(FavoriteOptions),
    Favorites,
    Login(LoginOptions),
    Logout,
    Whoami,
}

impl BackendDispatch {
    /// Returns None for local commands.
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        let dispatch = match cli.command.as_ref()? {
            Commands::List {
                search,
                category,
                location,
                price_min,
                price_max,
                from,
                to,
                favorites,
                limit,
                all,
            } => Self::List(ListOptions {
                search: search.clone(),
                category: category.clone(),
                location: location.clone(),
                price_min: *price_min,
                price_max: *price_max,
                from: from.clone(),
                to: to.clone(),
                favorites: *favorites,
                limit: *limit,
                all: *all,
            }),
            Commands::Show { event_id } => Self::Show(ShowOptions {
                event_id: event_id.clone(),
            }),
            Commands::Favorite { event_id } => Self::Favorite(FavoriteOptions {
                event_id: event_id.clone(),
            }),
            Commands::Favorites => Self::Favorites,
            Commands::Login { email, password } => Self::Login(LoginOptions {
                email: email.clone(),
                password: password.clone(),
            }),
            Commands::Logout => Self::Logout,
            Commands::Whoami => Self::Whoami,
            Commands::Config { .. } | Commands::Completions { .. } | Commands::Categories => {
                return None
            }
        };
        Some(dispatch)
    }
}

impl BackendCommand for BackendDispatch {
    async fn execute(&self, ctx: &CommandContext, backend: &Backend) -> Result<()> {
        match self {
            Self::List(opts) => commands::list::execute(ctx, opts, backend).await,
            Self::Show(opts) => commands::show::execute(ctx, opts, backend).await,
            Self::Favorite(opts) => commands::favorite::execute(ctx, opts, backend).await,
            Self::Favorites => commands::favorite::execute_list(ctx, backend).await,
            Self::Login(opts) => commands::auth::execute_login(ctx, opts, backend).await,
            Self::Logout => commands::auth::execute_logout(ctx, backend).await,
            Self::Whoami => commands::auth::execute_whoami(ctx, backend).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("spev").chain(args.iter().copied()))
    }

    #[test]
    fn test_local_commands() {
        assert!(matches!(
            LocalDispatch::try_from_cli(&parse(&[])),
            Some(LocalDispatch::Help)
        ));
        assert!(matches!(
            LocalDispatch::try_from_cli(&parse(&["categories"])),
            Some(LocalDispatch::Categories)
        ));
        assert!(matches!(
            LocalDispatch::try_from_cli(&parse(&["config", "path"])),
            Some(LocalDispatch::Config(Some(ConfigCommands::Path)))
        ));
        assert!(LocalDispatch::try_from_cli(&parse(&["list"])).is_none());
    }

    #[test]
    fn test_backend_commands() {
        assert!(BackendDispatch::from_cli(&parse(&["categories"])).is_none());
        assert!(BackendDispatch::from_cli(&parse(&[])).is_none());
        assert!(matches!(
            BackendDispatch::from_cli(&parse(&["whoami"])),
            Some(BackendDispatch::Whoami)
        ));
        assert!(matches!(
            BackendDispatch::from_cli(&parse(&["favorites"])),
            Some(BackendDispatch::Favorites)
        ));
    }

    #[test]
    fn test_list_options_carried_over() {
        let cli = parse(&["list", "-c", "Teatro", "--price-max", "50", "--all"]);
        let Some(BackendDispatch::List(opts)) = BackendDispatch::from_cli(&cli) else {
            panic!("Expected List dispatch");
        };
        assert_eq!(opts.category.as_deref(), Some("Teatro"));
        assert_eq!(opts.price_max, Some(50.0));
        assert!(opts.all);
        assert!(!opts.favorites);
    }

    #[test]
    fn test_favorite_dispatch() {
        let cli = parse(&["fav", "3f2a9c10"]);
        let Some(BackendDispatch::Favorite(opts)) = BackendDispatch::from_cli(&cli) else {
            panic!("Expected Favorite dispatch");
        };
        assert_eq!(opts.event_id, "3f2a9c10");
    }
}
