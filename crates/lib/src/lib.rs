//! # Free Text to Listing Suggestions
//!
//! This crate provides a client that turns a user's free-text request into a
//! structured classifieds-listing suggestion using a configurable AI
//! provider, then validates and repairs the model's reply into a strictly
//! typed record.

pub mod errors;
pub mod normalize;
pub mod prompts;
pub mod providers;
pub mod types;

pub use errors::SuggestError;
pub use types::{ClientRequest, ListingType, SuggestionClient, SuggestionClientBuilder, Suggestions};

use providers::ai::OutputFormat;
use tracing::{debug, info};

impl SuggestionClient {
    /// Generates listing suggestions for a client request.
    ///
    /// The pipeline is stateless per invocation and makes at most two
    /// sequential outbound calls:
    ///
    /// 1. **Meta stage** (when enabled): ask the model to write an optimized
    ///    instruction prompt from the request's fields. A blank result fails
    ///    with [`SuggestError::EmptyGeneratedPrompt`]. When disabled, the
    ///    static template is used and this stage makes no call.
    /// 2. **Suggestion stage**: send the stage-one instructions plus the
    ///    literal user text and normalize the reply into [`Suggestions`].
    ///
    /// Blank input fails with [`SuggestError::EmptyInput`] before any
    /// outbound call is made. No stage is retried.
    pub async fn generate_suggestions(
        &self,
        request: &ClientRequest,
    ) -> Result<Suggestions, SuggestError> {
        let user_text = request
            .text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(SuggestError::EmptyInput)?;

        let instructions = if self.meta_prompting {
            self.generate_dynamic_prompt(request).await?
        } else {
            debug!("Meta-prompting disabled, using static suggestion prompt");
            prompts::build_static_prompt()
        };

        let final_prompt = prompts::build_final_prompt(&instructions, user_text);
        debug!(prompt = %final_prompt, "Sending suggestion request to AI provider");

        let reply = self
            .ai_provider
            .generate(&final_prompt, OutputFormat::Json)
            .await?;
        debug!(?reply, "Raw suggestion reply from AI provider");

        let suggestions = normalize::normalize_reply(&reply)?;
        info!(listing_type = ?suggestions.listing_type, "Normalized model reply into suggestions");
        Ok(suggestions)
    }

    /// Runs the meta-prompt stage: one model call whose output is itself the
    /// instruction prompt for the suggestion stage.
    async fn generate_dynamic_prompt(
        &self,
        request: &ClientRequest,
    ) -> Result<String, SuggestError> {
        let meta_prompt = prompts::build_meta_prompt(request);
        debug!(prompt = %meta_prompt, "Sending meta-prompt request to AI provider");

        let reply = self
            .ai_provider
            .generate(&meta_prompt, OutputFormat::Text)
            .await?;

        let generated = reply
            .text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(SuggestError::EmptyGeneratedPrompt)?;

        debug!(prompt = %generated, "Meta stage produced dynamic prompt");
        Ok(generated.to_string())
    }
}
