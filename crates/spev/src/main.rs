use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::{load_config, Config};
use commands::{Backend, CommandContext, CommandError};
use dispatch::{BackendCommand, BackendDispatch, LocalCommand, LocalDispatch};
use sp_events_core::BrowserError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{:#}", error_json);
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Log level used when `RUST_LOG` is not set.
fn default_log_level(cli: &Cli) -> &'static str {
    if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(cli)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    if let Some(dispatch) = LocalDispatch::try_from_cli(cli) {
        // A broken config file must not lock the user out of `config set`.
        let ctx = match load_config()
            .and_then(|config| CommandContext::from_cli(cli).with_config(&config))
        {
            Ok(ctx) => ctx,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring config file");
                CommandContext::from_cli(cli)
            }
        };
        return dispatch.execute(&ctx).await;
    }

    let Some(dispatch) = BackendDispatch::from_cli(cli) else {
        return Ok(());
    };
    let backend = resolve_backend(cli, load_config()?)?;
    let ctx = CommandContext::from_cli(cli).with_config(&backend.config)?;
    tracing::debug!(url = %backend.url, "using backend");
    dispatch.execute(&ctx, &backend).await
}

/// Resolves backend settings with priority: flag > env > config.
///
/// Clap already folds `SPEV_URL` and `SPEV_API_KEY` into the flags.
fn resolve_backend(cli: &Cli, config: Config) -> commands::Result<Backend> {
    let url = cli
        .url
        .clone()
        .or_else(|| config.url.clone())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            CommandError::Config(
                "No backend URL configured. Set SPEV_URL or run 'spev config set url <URL>'"
                    .to_string(),
            )
        })?;
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| config.api_key.clone())
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            CommandError::Config(
                "No API key configured. Set SPEV_API_KEY or run 'spev config set api_key <KEY>'"
                    .to_string(),
            )
        })?;

    Ok(Backend {
        url,
        api_key,
        config,
    })
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Browser(BrowserError::SignInRequired) => "AUTH_REQUIRED",
        CommandError::Browser(BrowserError::Filter(_)) | CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Api(e) if e.is_auth() => "AUTH_ERROR",
        CommandError::Api(_) => "API_ERROR",
        CommandError::Remote(_) => "REMOTE_ERROR",
        CommandError::NotFound(_) => "NOT_FOUND",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    let code = match e {
        CommandError::Config(_) => 5,
        CommandError::Browser(BrowserError::SignInRequired) => 2,
        CommandError::Browser(BrowserError::Filter(_)) | CommandError::Filter(_) => 1,
        CommandError::Api(e) => e.exit_code(),
        CommandError::Remote(_) => 2,
        CommandError::NotFound(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Json(_) => 1,
    };
    u8::try_from(code).unwrap_or(1)
}

fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}
