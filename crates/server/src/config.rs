//! # Application Configuration
//!
//! This module defines the configuration structure for the `listify-server`
//! and provides the logic for loading it from a `config.yml` file and
//! environment variables. The file is read first with `${VAR}` substitution
//! applied, then environment variables are layered on top, and finally the
//! model API key falls back to `GEMINI_API_KEY` when the file left it empty.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whether the meta-prompt stage runs before the suggestion call.
    #[serde(default = "default_meta_prompting")]
    pub meta_prompting: bool,
    /// The AI provider configuration.
    pub provider: ProviderConfig,
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    9090
}

/// Meta-prompting is the most evolved pipeline shape, so it is the default.
fn default_meta_prompting() -> bool {
    true
}

/// Configuration for a specific AI provider instance.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider (e.g., "gemini", "local").
    pub provider: String,
    /// The API URL. Optional for Gemini, where it can be derived from the model name.
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key, which can be null for local providers.
    #[serde(default)]
    pub api_key: Option<String>,
    pub model_name: String,
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").unwrap();
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// The configuration is resolved in layers:
/// - `config.yml` (or the override path), with `${VAR}` substitution.
/// - Top-level keys overridden by environment variables (e.g. `PORT`).
/// - Nested keys overridden by `LISTIFY_...` variables
///   (e.g. `LISTIFY_PROVIDER__MODEL_NAME`).
/// - `GEMINI_API_KEY` from the environment as the final fallback for
///   `provider.api_key` when the file leaves it unset or empty.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let main_config_path = if let Some(override_path) = config_path_override {
        override_path.to_string()
    } else {
        format!("{base_path}/config.yml")
    };

    let main_content = read_and_substitute(&main_config_path)?.ok_or_else(|| {
        ConfigError::NotFound(format!(
            "Main config file not found at '{main_config_path}'. Please ensure 'config.yml' exists."
        ))
    })?;
    info!("Loading configuration from '{main_config_path}'.");

    let settings = ConfigBuilder::builder()
        .add_source(File::from_str(&main_content, FileFormat::Yaml))
        // Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("LISTIFY")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // `${GEMINI_API_KEY}` substitution leaves an empty string when the
    // variable is unset; treat that the same as an absent key.
    if config
        .provider
        .api_key
        .as_deref()
        .is_some_and(|key| key.is_empty())
    {
        config.provider.api_key = None;
    }

    // After all layers, explicitly check for GEMINI_API_KEY from the
    // environment if the file did not provide a key.
    if config.provider.api_key.is_none() {
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.provider.api_key = Some(key);
            }
        }
    }

    Ok(config)
}
