//! Persistence of the signed-in session.
//!
//! The session is kept in `session.json` next to the config file, or in the
//! OS keyring when `session_storage = "keyring"`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use sp_events_api::client::EventsClient;
use sp_events_api::models::Session;

use super::config::{get_config_dir, Config};
use super::{keyring, Backend, CommandError, Result};

const SESSION_FILE: &str = "session.json";

/// Path of the session file.
pub fn session_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(SESSION_FILE))
}

fn read_session_file(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    match serde_json::from_str(&content) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
            Ok(None)
        }
    }
}

fn write_session_file(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(session)?)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

fn remove_session_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Loads the stored session, if any.
pub fn load_session(config: &Config) -> Result<Option<Session>> {
    if config.uses_keyring() {
        return match keyring::get_session()? {
            Some(json) => Ok(serde_json::from_str(&json).ok()),
            None => Ok(None),
        };
    }
    read_session_file(&session_path()?)
}

/// Stores `session`, replacing any previous one.
pub fn save_session(config: &Config, session: &Session) -> Result<()> {
    if config.uses_keyring() {
        return keyring::store_session(&serde_json::to_string(session)?);
    }
    write_session_file(&session_path()?, session)
}

/// Forgets the stored session.
pub fn clear_session(config: &Config) -> Result<()> {
    if config.uses_keyring() {
        return keyring::delete_session();
    }
    remove_session_file(&session_path()?)
}

/// Builds a client carrying the stored session's access token.
///
/// An expired session is refreshed and stored again. Without a usable
/// session the client is anonymous and the store reports no user.
pub async fn signed_in_client(backend: &Backend) -> Result<EventsClient> {
    let client = backend.anonymous_client()?;
    let Some(session) = load_session(&backend.config)? else {
        tracing::debug!("no stored session");
        return Ok(client);
    };

    if !session.is_expired(Utc::now()) {
        return Ok(client.with_access_token(&session.access_token));
    }

    tracing::debug!("session expired, refreshing");
    match client.refresh_session(&session.refresh_token).await {
        Ok(fresh) => {
            save_session(&backend.config, &fresh)?;
            Ok(client.with_access_token(&fresh.access_token))
        }
        Err(e) if e.is_auth() => {
            tracing::info!("stored session was revoked");
            clear_session(&backend.config)?;
            Ok(client)
        }
        Err(e) => Err(CommandError::Api(e)),
    }
}
