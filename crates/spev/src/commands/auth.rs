//! Login, logout and whoami commands.

use std::io;

use dialoguer::{Input, Password};
use owo_colors::OwoColorize;
use sp_events_api::models::AuthUser;
use sp_events_core::{BrowserError, EventBrowser, Route};

use super::session::{clear_session, load_session, save_session, signed_in_client};
use super::{Backend, CommandContext, CommandError, Result};

/// Options for the login command.
#[derive(Debug)]
pub struct LoginOptions {
    /// Account email.
    pub email: Option<String>,
    /// Account password.
    pub password: Option<String>,
}

fn prompt_error(e: dialoguer::Error) -> CommandError {
    CommandError::Io(io::Error::other(e.to_string()))
}

/// Fills in missing credentials, prompting when a terminal is attached.
fn credentials(ctx: &CommandContext, opts: &LoginOptions) -> Result<(String, String)> {
    let missing = || {
        CommandError::Config(
            "Email and password are required. Pass --email and set SPEV_PASSWORD, or run interactively."
                .to_string(),
        )
    };

    let email = match opts.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => email.to_string(),
        _ if ctx.is_interactive() => Input::<String>::new()
            .with_prompt("Email")
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                if input.contains('@') {
                    Ok(())
                } else {
                    Err("Enter a valid email address")
                }
            })
            .interact_text()
            .map_err(prompt_error)?
            .trim()
            .to_string(),
        _ => return Err(missing()),
    };

    let password = match opts.password.as_deref() {
        Some(password) if !password.is_empty() => password.to_string(),
        _ if ctx.is_interactive() => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(prompt_error)?,
        _ => return Err(missing()),
    };

    Ok((email, password))
}

fn user_label(user: &AuthUser) -> &str {
    user.email.as_deref().unwrap_or(&user.id)
}

/// Executes the login command.
///
/// # Errors
///
/// Returns an API auth error for wrong credentials.
pub async fn execute_login(
    ctx: &CommandContext,
    opts: &LoginOptions,
    backend: &Backend,
) -> Result<()> {
    let (email, password) = credentials(ctx, opts)?;

    let client = backend.anonymous_client()?;
    let session = client.sign_in_with_password(&email, &password).await?;
    save_session(&backend.config, &session)?;
    tracing::info!(user_id = %session.user.id, "signed in");

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "signed_in",
            "user": session.user,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        let label = user_label(&session.user);
        if ctx.use_colors {
            println!("Signed in as {}", label.green().bold());
        } else {
            println!("Signed in as {}", label);
        }
    }
    Ok(())
}

/// Executes the logout command.
///
/// The backend session is revoked on a best-effort basis; the stored session
/// is always forgotten.
pub async fn execute_logout(ctx: &CommandContext, backend: &Backend) -> Result<()> {
    let client = backend.anonymous_client()?;
    let had_session = match load_session(&backend.config)? {
        Some(session) => {
            let mut browser = EventBrowser::new(client.with_access_token(&session.access_token));
            browser.sign_out().await;
            true
        }
        None => false,
    };
    clear_session(&backend.config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "signed_out",
            "had_session": had_session,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if had_session {
            println!("Signed out.");
        } else {
            println!("Not signed in.");
        }
    }
    Ok(())
}

/// Executes the whoami command.
///
/// # Errors
///
/// Returns [`BrowserError::SignInRequired`] without a valid session.
pub async fn execute_whoami(ctx: &CommandContext, backend: &Backend) -> Result<()> {
    let client = signed_in_client(backend).await?;
    let mut browser = EventBrowser::new(client);
    if browser.resolve_session().await == Route::Login {
        return Err(BrowserError::SignInRequired.into());
    }
    let Some(user) = browser.state().session.user() else {
        return Err(BrowserError::SignInRequired.into());
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(user)?);
    } else {
        println!("{}", user_label(user));
        if ctx.verbose {
            println!("ID: {}", user.id);
        }
    }
    Ok(())
}
