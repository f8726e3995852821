//! # Common Test Utilities
//!
//! Shared harness for the `listify-server` integration tests. `TestApp`
//! spawns the real router on a random port, with the suggestion client
//! pointed at an OpenAI-compatible `httpmock::MockServer` standing in for
//! the model provider.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use httpmock::MockServer;
use listify::{providers::ai::local::LocalAiProvider, SuggestionClientBuilder};
use listify_server::{
    config::{AppConfig, ProviderConfig},
    router::create_router,
    state::AppState,
};
use reqwest::Client;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, task::JoinHandle};

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    _server_handle: JoinHandle<()>,
}

impl TestApp {
    /// Spawns the application server with meta-prompting enabled.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_meta(true).await
    }

    /// Spawns the application server, selecting the pipeline shape.
    pub async fn spawn_with_meta(meta_prompting: bool) -> Result<Self> {
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let model_url = mock_server.url("/v1/chat/completions");

        let provider = Box::new(LocalAiProvider::new(
            model_url.clone(),
            None,
            Some("mock-model".to_string()),
        )?);
        let suggestion_client = SuggestionClientBuilder::new()
            .ai_provider(provider)
            .meta_prompting(meta_prompting)
            .build()?;

        let config = AppConfig {
            port: 0,
            meta_prompting,
            provider: ProviderConfig {
                provider: "local".to_string(),
                api_url: Some(model_url),
                api_key: None,
                model_name: "mock-model".to_string(),
            },
        };

        let app_state = AppState {
            config: Arc::new(config),
            suggestion_client: Arc::new(suggestion_client),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let server_handle = tokio::spawn(async move {
            let app = create_router(app_state);
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Server error: {e}");
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            _server_handle: server_handle,
        })
    }
}

/// An OpenAI-compatible chat-completions body carrying `content`.
pub fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}
