use crate::{
    errors::SuggestError,
    providers::ai::{AiProvider, ModelReply, OutputFormat},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::json;

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct LocalAiRequest<'a> {
    messages: Vec<LocalAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct LocalAiMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct LocalAiResponse {
    #[serde(default)]
    choices: Vec<LocalAiChoice>,
}

#[derive(Deserialize, Debug)]
struct LocalAiChoice {
    message: Option<LocalAiMessage>,
    finish_reason: Option<String>,
}

// --- Local Provider implementation ---

/// A provider for interacting with a local or OpenAI-compatible API.
///
/// This is the provider integration tests point at a mock server, and the
/// escape hatch for running the service against a self-hosted model.
#[derive(Clone, Debug)]
pub struct LocalAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl LocalAiProvider {
    /// Creates a new `LocalAiProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Self, SuggestError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(SuggestError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl AiProvider for LocalAiProvider {
    async fn generate(
        &self,
        prompt: &str,
        format: OutputFormat,
    ) -> Result<ModelReply, SuggestError> {
        let messages = vec![LocalAiMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        }];

        let response_format = match format {
            OutputFormat::Json => Some(json!({"type": "json_object"})),
            OutputFormat::Text => None,
        };

        let request_body = LocalAiRequest {
            messages,
            model: self.model.as_deref(),
            response_format,
            temperature: 0.0,
            stream: false,
        };

        let mut request_builder = self.client.post(&self.api_url);

        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(SuggestError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SuggestError::AiApi(error_text));
        }

        let local_ai_response: LocalAiResponse = response
            .json()
            .await
            .map_err(SuggestError::AiDeserialization)?;

        let choice = local_ai_response.choices.into_iter().next();
        let finish_reason = choice.as_ref().and_then(|c| c.finish_reason.clone());
        let text = choice
            .and_then(|c| c.message)
            .map(|message| message.content);

        Ok(ModelReply {
            text,
            finish_reason,
        })
    }
}
