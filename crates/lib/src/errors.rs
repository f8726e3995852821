use thiserror::Error;

/// Custom error types for the suggestion pipeline.
///
/// Every failure here is terminal for the invocation: no stage is retried,
/// and the caller decides whether to try again.
#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider is missing")]
    MissingAiProvider,
    #[error("Input 'text' is required and must be non-empty")]
    EmptyInput,
    #[error("Meta-prompt stage returned an empty prompt")]
    EmptyGeneratedPrompt,
    #[error("Content generation stopped: {0}")]
    GenerationStopped(String),
    #[error("AI response contained no text content")]
    EmptyResponse,
    #[error("Failed to parse JSON from AI response. Raw: {0}")]
    UnparseableResponse(String),
    #[error("AI response missing or invalid key: {0}")]
    MissingField(String),
}
