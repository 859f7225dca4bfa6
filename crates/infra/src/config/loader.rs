//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Loads a `.env` file into the process environment when one exists
//! 2. If any `LINKREACH_*` variable is set, builds the configuration from
//!    defaults plus those variables
//! 3. Otherwise probes the standard paths for a config file
//! 4. With no file either, uses the built-in defaults
//!
//! Every result is validated before it is returned.
//!
//! ## Environment Variables
//! - `LINKREACH_DELIVERY_CHUNK_SIZE`: Items per delivered chunk
//! - `LINKREACH_CONNECTIONS_BATCH`, `LINKREACH_INVITATIONS_BATCH`,
//!   `LINKREACH_MESSAGES_BATCH`, `LINKREACH_SEARCH_BATCH`: Per-call caps
//! - `LINKREACH_ACTION_DELAY_MIN_SECS`, `LINKREACH_ACTION_DELAY_MAX_SECS`:
//!   Dispatcher pacing
//! - `LINKREACH_CONTINUATION_<KIND>_MIN_SECS`,
//!   `LINKREACH_CONTINUATION_<KIND>_MAX_SECS`: Delay between fetch cycles,
//!   where `<KIND>` is `CONNECTIONS`, `INVITATIONS`, `CONVERSATIONS`,
//!   `MESSAGES` or `SEARCH`
//! - `LINKREACH_MAX_CYCLES`: Cycle limit per continuation run
//! - `LINKREACH_LOG_LEVEL`: Log filter directive
//! - `LINKREACH_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./linkreach.json` or `./linkreach.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use linkreach_domain::{Config, DelayBounds, LinkReachError, ResourceKind, Result};

use crate::errors::InfraError;

const ENV_PREFIX: &str = "LINKREACH_";
const FILE_STEMS: [&str; 2] = ["linkreach", "config"];
const FILE_EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `LinkReachError::Config` if a source exists but cannot be parsed,
/// or if the resulting configuration fails validation.
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) if has_env_overrides() => Err(e),
        Err(e) => {
            tracing::debug!(error = %e, "No environment configuration, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("No config file found, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }
}

/// Load configuration from environment variables
///
/// Unset variables keep their default values. See module documentation for
/// the complete list.
///
/// # Errors
/// Returns `LinkReachError::Config` if no `LINKREACH_*` variable is set, if
/// a value cannot be parsed, or if validation fails.
pub fn load_from_env() -> Result<Config> {
    if !has_env_overrides() {
        return Err(LinkReachError::Config(format!("No {ENV_PREFIX}* environment variables set")));
    }

    let mut config = Config::default();

    let pagination = &mut config.pagination;
    override_env("LINKREACH_DELIVERY_CHUNK_SIZE", &mut pagination.delivery_chunk_size)?;
    override_env("LINKREACH_CONNECTIONS_BATCH", &mut pagination.connections_batch)?;
    override_env("LINKREACH_INVITATIONS_BATCH", &mut pagination.invitations_batch)?;
    override_env("LINKREACH_MESSAGES_BATCH", &mut pagination.messages_batch)?;
    override_env("LINKREACH_SEARCH_BATCH", &mut pagination.search_batch)?;

    override_delay("LINKREACH_ACTION_DELAY", &mut config.dispatcher.action_delay)?;

    let continuation = &mut config.continuation;
    for kind in ResourceKind::ALL {
        let prefix = format!("LINKREACH_CONTINUATION_{}", kind.as_str().to_ascii_uppercase());
        let bounds = match kind {
            ResourceKind::Connections => &mut continuation.connections,
            ResourceKind::Invitations => &mut continuation.invitations,
            ResourceKind::Conversations => &mut continuation.conversations,
            ResourceKind::Messages => &mut continuation.messages,
            ResourceKind::Search => &mut continuation.search,
        };
        override_delay(&prefix, bounds)?;
    }
    if let Some(max_cycles) = env_parse::<u32>("LINKREACH_MAX_CYCLES")? {
        continuation.max_cycles = Some(max_cycles);
    }

    if let Ok(level) = std::env::var("LINKREACH_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("LINKREACH_LOG_JSON", config.logging.json);

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `LinkReachError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Validation fails
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(LinkReachError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            LinkReachError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| LinkReachError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content, by file extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let parsed = match extension {
        "toml" => toml::from_str(contents).map_err(InfraError::from),
        "json" => serde_json::from_str(contents).map_err(InfraError::from),
        _ => {
            return Err(LinkReachError::Config(format!("Unsupported config format: {extension}")));
        }
    };
    parsed.map_err(LinkReachError::from)
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, its two parents, then the executable's
/// directory and its two parents.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    candidates_in(&roots).into_iter().find(|path| path.exists())
}

fn candidates_in(roots: &[PathBuf]) -> Vec<PathBuf> {
    roots
        .iter()
        .flat_map(|root| {
            FILE_STEMS.iter().flat_map(move |stem| {
                FILE_EXTENSIONS.iter().map(move |ext| root.join(format!("{stem}.{ext}")))
            })
        })
        .collect()
}

fn has_env_overrides() -> bool {
    std::env::vars_os().any(|(key, _)| key.to_str().is_some_and(|k| k.starts_with(ENV_PREFIX)))
}

/// Parse an optional environment variable.
///
/// # Errors
/// Returns `LinkReachError::Config` if the variable is set but unparsable.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| LinkReachError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

fn override_env<T>(key: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(value) = env_parse(key)? {
        *target = value;
    }
    Ok(())
}

fn override_delay(prefix: &str, bounds: &mut DelayBounds) -> Result<()> {
    override_env(&format!("{prefix}_MIN_SECS"), &mut bounds.min_secs)?;
    override_env(&format!("{prefix}_MAX_SECS"), &mut bounds.max_secs)
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map_or(default, |s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}
