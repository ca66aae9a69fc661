//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.placefinder/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_OPENNAMES_BASE_URL: &str = "https://api.ordnancesurvey.co.uk/opennames/v1";
pub const DEFAULT_PLACES_BASE_URL: &str = "https://api.ordnancesurvey.co.uk/places/v1";

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlacefinderConfig {
    #[serde(default)]
    pub opennames: OpennamesConfig,
    #[serde(default)]
    pub places: PlacesConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpennamesConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlacesConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub opennames_api_key: Option<String>,
    pub opennames_base_url: String,
    pub places_api_key: Option<String>,
    pub places_base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.placefinder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".placefinder").join("config.toml"))
}

/// Load config from `~/.placefinder/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PlacefinderConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PlacefinderConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PlacefinderConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PlacefinderConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: PlacefinderConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Placefinder Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [opennames]
# api_key = "..."                    # Or set OPENNAMES_API_KEY env var
# base_url = "https://api.ordnancesurvey.co.uk/opennames/v1"

# [places]
# api_key = "..."                    # Or set PLACES_API_KEY env var
# base_url = "https://api.ordnancesurvey.co.uk/places/v1"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// The `cli_*` keys are from the CLI flags (None = not specified).
pub fn resolve(
    config: &PlacefinderConfig,
    cli_opennames_key: Option<&str>,
    cli_places_key: Option<&str>,
) -> ResolvedConfig {
    // API keys: CLI → env → config
    let opennames_api_key = cli_opennames_key
        .map(|s| s.to_string())
        .or_else(|| std::env::var("OPENNAMES_API_KEY").ok())
        .or_else(|| config.opennames.api_key.clone());
    let places_api_key = cli_places_key
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PLACES_API_KEY").ok())
        .or_else(|| config.places.api_key.clone());

    // Base URLs: env → config → default
    let opennames_base_url = std::env::var("OPENNAMES_BASE_URL")
        .ok()
        .or_else(|| config.opennames.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPENNAMES_BASE_URL.to_string());
    let places_base_url = std::env::var("PLACES_BASE_URL")
        .ok()
        .or_else(|| config.places.base_url.clone())
        .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string());

    ResolvedConfig {
        opennames_api_key,
        opennames_base_url,
        places_api_key,
        places_base_url,
    }
}
