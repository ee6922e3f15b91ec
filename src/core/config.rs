//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ttychat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Provider;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TtyChatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ollama: EndpointConfig,
    #[serde(default)]
    pub lmstudio: EndpointConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub reply_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_REPLY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub model_name: String,
    pub reply_timeout: Duration,
    pub ollama_base_url: String,
    pub lmstudio_base_url: String,
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

/// Returns `~/.ttychat/config.toml`, or None if the home dir is unknown.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ttychat").join("config.toml"))
}

/// Loads the config file, generating a commented default if it is missing.
pub fn load() -> Result<TtyChatConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(TtyChatConfig::default());
    };
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<TtyChatConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TtyChatConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TtyChatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# ttychat Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# provider = "ollama"                # "ollama", "lmstudio" or "echo"
# model = "llama3.2"
# reply_timeout_secs = 30

# [ollama]
# base_url = "http://localhost:11434"   # Or set OLLAMA_BASE_URL

# [lmstudio]
# base_url = "http://localhost:1234/v1" # Or set LM_STUDIO_BASE_URL
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Environment lookups used during resolution.
///
/// Kept behind a function so tests can resolve without touching the
/// process environment.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_provider` and `cli_model` are from CLI flags (None = not specified).
pub fn resolve(
    config: &TtyChatConfig,
    cli_provider: Option<Provider>,
    cli_model: Option<&str>,
) -> ResolvedConfig {
    resolve_with_env(config, cli_provider, cli_model, &process_env)
}

pub fn resolve_with_env(
    config: &TtyChatConfig,
    cli_provider: Option<Provider>,
    cli_model: Option<&str>,
    env: EnvLookup<'_>,
) -> ResolvedConfig {
    // Provider: CLI → env → config → default
    let provider = cli_provider
        .or_else(|| {
            env("TTYCHAT_PROVIDER").and_then(|s| match Provider::from_str(&s, true) {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!("Ignoring TTYCHAT_PROVIDER={s}: {e}");
                    None
                }
            })
        })
        .or(config.general.provider)
        .unwrap_or_default();

    // Model: CLI → env → config → default
    let model_name = cli_model
        .map(str::to_string)
        .or_else(|| env("TTYCHAT_MODEL"))
        .or_else(|| config.general.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let reply_timeout = Duration::from_secs(
        config
            .general
            .reply_timeout_secs
            .unwrap_or(DEFAULT_REPLY_TIMEOUT_SECS),
    );

    // Base URLs: env → config → default
    let ollama_base_url = env("OLLAMA_BASE_URL")
        .or_else(|| config.ollama.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string());

    let lmstudio_base_url = env("LM_STUDIO_BASE_URL")
        .or_else(|| config.lmstudio.base_url.clone())
        .unwrap_or_else(|| DEFAULT_LMSTUDIO_BASE_URL.to_string());

    ResolvedConfig {
        provider,
        model_name,
        reply_timeout,
        ollama_base_url,
        lmstudio_base_url,
    }
}
