//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/spev/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use tokio::process::Command;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use sp_events_core::filter::parse_time_zone;

use super::{CommandContext, CommandError, Result};
use crate::output::DateFormat;

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Minimum key length to apply masking (show first and last N characters).
const KEY_MASK_MIN_LENGTH: usize = 8;

/// Number of characters to show at start/end of a masked key.
const KEY_MASK_VISIBLE_CHARS: usize = 4;

/// Valid values for `session_storage`.
const SESSION_STORAGE_VALUES: [&str; 2] = ["file", "keyring"];

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# spev - SP Events CLI Configuration

# Config schema version (do not modify)
version = 1

# Backend project URL (can also use SPEV_URL env var)
# url = "https://your-project.supabase.co"

# Public API key (can also use SPEV_API_KEY env var)
# api_key = "your-anon-key"

# Where the signed-in session is kept: "file" or "keyring"
# session_storage = "file"

# Time zone for dates given to --from/--to and shown in tables
# timezone = "America/Sao_Paulo"

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)
# date_format = "relative"  # "relative", "iso", "short"
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Backend project URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Public API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Session storage method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_storage: Option<String>,

    /// IANA time zone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            url: None,
            api_key: None,
            session_storage: None,
            timezone: None,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Returns true when the session should live in the OS keyring.
    pub fn uses_keyring(&self) -> bool {
        self.session_storage.as_deref() == Some("keyring")
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Date format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/spev/ on all platforms.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var("SPEV_CONFIG") {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("spev"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("spev"))
        .ok_or_else(|| {
            CommandError::Config("Could not determine config directory".to_string())
        })
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("SPEV_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the initial schema.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let mut shown = serde_json::to_value(&config)?;
        if let Some(key) = &config.api_key {
            shown["api_key"] = serde_json::Value::String(mask_key(key));
        }
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": shown,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(ref url) = config.url {
                println!("  url: {}", url);
            }
            if let Some(ref key) = config.api_key {
                println!("  api_key: {}", mask_key(key));
            }
            if let Some(ref storage) = config.session_storage {
                println!("  session_storage: {}", storage);
            }
            if let Some(ref zone) = config.timezone {
                println!("  timezone: {}", zone);
            }

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }
            if let Some(ref format) = config.output.date_format {
                println!("  date_format: {}", format);
            }
        } else {
            println!("(No config file exists. Run 'spev config edit' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config edit command.
pub async fn execute_edit(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    if !path.exists() {
        fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| CommandError::Config(format!("Failed to create config file: {}", e)))?;

        if !ctx.quiet && !ctx.json_output {
            eprintln!("Created default config at: {}", path.display());
        }
    }

    let editor = env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| "vi".to_string());

    tracing::debug!(path = %path.display(), %editor, "opening config in editor");

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .await
        .map_err(|e| CommandError::Config(format!("Failed to open editor '{}': {}", editor, e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if status.success() { "success" } else { "error" },
            "editor": editor,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if status.success() {
            println!("Config saved.");
        } else {
            eprintln!("Editor exited with error");
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Applies one `key = value` assignment to a config.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let (section, field) = match key.split_once('.') {
        Some((section, field)) => (Some(section), field),
        None => (None, key),
    };

    match (section, field) {
        (None, "url") => {
            let trimmed = value.trim().trim_end_matches('/');
            if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
                return Err(CommandError::Config(format!(
                    "Invalid url '{}'. Expected an http(s) URL",
                    value
                )));
            }
            config.url = Some(trimmed.to_string());
        }
        (None, "api_key") => {
            config.api_key = Some(value.to_string());
        }
        (None, "session_storage") => {
            if !SESSION_STORAGE_VALUES.contains(&value) {
                return Err(CommandError::Config(format!(
                    "Invalid session_storage value '{}'. Valid values: {}",
                    value,
                    SESSION_STORAGE_VALUES.join(", ")
                )));
            }
            config.session_storage = Some(value.to_string());
        }
        (None, "timezone") => {
            parse_time_zone(value)?;
            config.timezone = Some(value.to_string());
        }
        (Some("output"), "color") => {
            config.output.color = Some(parse_bool(value)?);
        }
        (Some("output"), "date_format") => {
            value.parse::<DateFormat>().map_err(CommandError::Config)?;
            config.output.date_format = Some(value.to_string());
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: url, api_key, session_storage, timezone, output.color, output.date_format",
                key
            )));
        }
    }
    Ok(())
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    let shown = if opts.key == "api_key" {
        mask_key(&opts.value)
    } else {
        opts.value.clone()
    };

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": shown,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, shown);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Masks a key for display, showing only the first and last N characters.
///
/// Uses character-based (not byte-based) indexing to safely handle
/// multi-byte UTF-8 characters.
pub fn mask_key(key: &str) -> String {
    let char_count = key.chars().count();
    if char_count > KEY_MASK_MIN_LENGTH {
        let prefix: String = key.chars().take(KEY_MASK_VISIBLE_CHARS).collect();
        let suffix: String = key.chars().skip(char_count - KEY_MASK_VISIBLE_CHARS).collect();
        format!("{}...{}", prefix, suffix)
    } else {
        "****".to_string()
    }
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}
