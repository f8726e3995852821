//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the
//! logic for building it at startup. The suggestion client (and with it the
//! AI provider handle) is created exactly once per process and shared across
//! all request handlers.

use crate::config::AppConfig;
use listify::{
    providers::ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
    SuggestionClient, SuggestionClientBuilder,
};
use std::sync::Arc;

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// The process-wide suggestion client.
    pub suggestion_client: Arc<SuggestionClient>,
}

/// Builds the shared application state from the configuration.
///
/// Instantiates the configured AI provider and wraps it in a
/// `SuggestionClient`. A gemini provider without an API key is a fatal
/// startup condition, never a silent degrade.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let provider: Box<dyn AiProvider> = match config.provider.provider.as_str() {
        "gemini" => {
            let api_key = config.provider.api_key.clone().ok_or_else(|| {
                anyhow::anyhow!(
                    "api_key is required for the gemini provider. Set GEMINI_API_KEY or provider.api_key in config.yml."
                )
            })?;
            // If api_url is not provided in config, construct it from the model name.
            let api_url = config.provider.api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    config.provider.model_name
                )
            });
            Box::new(GeminiProvider::new(api_url, api_key)?)
        }
        "local" => {
            // For local providers, the URL is always required.
            let api_url = config.provider.api_url.clone().ok_or_else(|| {
                anyhow::anyhow!("api_url is required for the local provider")
            })?;
            Box::new(LocalAiProvider::new(
                api_url,
                config.provider.api_key.clone(),
                Some(config.provider.model_name.clone()),
            )?)
        }
        other => {
            return Err(anyhow::anyhow!("Unsupported AI provider type '{other}'"));
        }
    };

    let suggestion_client = SuggestionClientBuilder::new()
        .ai_provider(provider)
        .meta_prompting(config.meta_prompting)
        .build()?;

    tracing::info!(
        provider = %config.provider.provider,
        model = %config.provider.model_name,
        meta_prompting = config.meta_prompting,
        "Initialized suggestion client."
    );

    Ok(AppState {
        config: Arc::new(config),
        suggestion_client: Arc::new(suggestion_client),
    })
}
