pub mod gemini;
pub mod local;

use crate::errors::SuggestError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// The output format requested from the provider for a single call.
///
/// `Json` asks the provider for strict JSON-formatted output where the API
/// supports it; `Text` is used for the meta-prompt stage, whose output is an
/// instruction prompt rather than structured data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A single model reply, reduced to what the normalization pipeline needs.
///
/// `text` is the first candidate's text content, if any; `finish_reason` is
/// the provider's stop indicator, used to classify replies that carry no
/// text at all.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    pub text: Option<String>,
    pub finish_reason: Option<String>,
}

/// A trait for interacting with an AI provider.
///
/// This defines a common interface for issuing a single-turn generation
/// request against different hosted model APIs (e.g., Gemini, local
/// OpenAI-compatible servers). Each call is one blocking round trip with no
/// retry; whatever default timeout the transport provides applies as-is.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends `prompt` as a single user-role turn and returns the reply.
    async fn generate(&self, prompt: &str, format: OutputFormat)
        -> Result<ModelReply, SuggestError>;
}

dyn_clone::clone_trait_object!(AiProvider);
