//! Keyring operations for secure session storage.
//!
//! Stores the serialized session in the OS-native credential manager:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service API (requires libsecret)

use keyring::Entry;

use super::{CommandError, Result};

/// Shown after every platform hint.
const FILE_STORAGE_ALTERNATIVE: &str =
    "Alternative: keep the session in a file with 'spev config set session_storage file'";

/// Provides platform-specific hints for keyring errors.
fn platform_hint(error: &keyring::Error) -> String {
    let base_error = format!("{}", error);

    let hint = match error {
        keyring::Error::NoStorageAccess(_) => platform_access_hint(),
        keyring::Error::PlatformFailure(_) => platform_failure_hint(),
        _ => return base_error,
    };

    format!(
        "{}\n\nHint: {}\n\n{}",
        base_error, hint, FILE_STORAGE_ALTERNATIVE
    )
}

#[cfg(target_os = "linux")]
fn platform_access_hint() -> &'static str {
    "On Linux, spev uses the Secret Service API (libsecret) for secure storage.\n\
     To fix this:\n\
     1. Install a secret service provider (gnome-keyring or kwallet)\n\
     2. Ensure the keyring daemon is running:\n\
        - Check: 'systemctl --user status gnome-keyring-daemon'\n\
     3. For SSH sessions, ensure D-Bus is available"
}

#[cfg(target_os = "macos")]
fn platform_access_hint() -> &'static str {
    "On macOS, spev uses the Keychain for secure storage.\n\
     To fix this:\n\
     1. Check if Keychain Access is locked\n\
     2. If prompted, allow 'spev' to access the keychain"
}

#[cfg(target_os = "windows")]
fn platform_access_hint() -> &'static str {
    "On Windows, spev uses Credential Manager for secure storage.\n\
     Open Credential Manager and check for issues with Windows Credentials."
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_access_hint() -> &'static str {
    "Your platform's credential storage is not accessible."
}

#[cfg(target_os = "linux")]
fn platform_failure_hint() -> &'static str {
    "The Secret Service API encountered an error.\n\
     Common causes:\n\
     1. D-Bus session bus not available (common in containers/SSH)\n\
        - Try: 'eval $(dbus-launch --sh-syntax)'\n\
     2. Keyring daemon not running\n\
        - Start: 'gnome-keyring-daemon --start --components=secrets'"
}

#[cfg(target_os = "macos")]
fn platform_failure_hint() -> &'static str {
    "The Keychain encountered an error.\n\
     Try 'Keychain First Aid' in Keychain Access."
}

#[cfg(target_os = "windows")]
fn platform_failure_hint() -> &'static str {
    "Windows Credential Manager encountered an error.\n\
     Make sure the 'Credential Manager' service is running."
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_failure_hint() -> &'static str {
    "Your platform's credential storage encountered an error."
}

/// Service name for keyring entries.
const SERVICE: &str = "spev-sp-events-cli";

/// Username for the session entry.
const USERNAME: &str = "session";

fn entry() -> Result<Entry> {
    Entry::new(SERVICE, USERNAME)
        .map_err(|e| CommandError::Config(format!("Keyring error: {}", platform_hint(&e))))
}

/// Stores the serialized session in the OS keyring.
pub fn store_session(json: &str) -> Result<()> {
    entry()?.set_password(json).map_err(|e| {
        CommandError::Config(format!("Failed to store session: {}", platform_hint(&e)))
    })
}

/// Retrieves the serialized session from the OS keyring.
///
/// Returns `Ok(None)` if no session is stored.
pub fn get_session() -> Result<Option<String>> {
    match entry()?.get_password() {
        Ok(json) => Ok(Some(json)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(keyring::Error::Ambiguous(_)) => Ok(None),
        Err(e) => Err(CommandError::Config(format!(
            "Failed to read session: {}",
            platform_hint(&e)
        ))),
    }
}

/// Deletes the session from the OS keyring.
///
/// Succeeds when nothing was stored.
pub fn delete_session() -> Result<()> {
    match entry()?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(CommandError::Config(format!(
            "Failed to delete session: {}",
            platform_hint(&e)
        ))),
    }
}
