//! # Prompt Templates
//!
//! This module contains the prompt templates used by the `SuggestionClient`
//! and the helpers that assemble them from a [`ClientRequest`]. The meta
//! template asks the model to write the instruction prompt for the second
//! stage; the static template is the single-stage alternative used when
//! meta-prompting is disabled.

use crate::types::ClientRequest;

/// The closed category vocabulary the model may draw from.
///
/// `suggested_categories` entries outside this list are still returned to the
/// caller verbatim; the vocabulary is enforced through the prompt contract,
/// not the normalizer.
pub const LISTING_CATEGORIES: [&str; 11] = [
    "Electronics",
    "Vehicles",
    "Property",
    "Home & Garden",
    "Fashion",
    "Hobbies & Leisure",
    "Services",
    "Jobs",
    "Pets",
    "Travel",
    "Other",
];

/// The meta-prompt template for the first pipeline stage.
///
/// Placeholders: `{context}` (the client-field summary), `{categories}`.
pub const META_PROMPT_TEMPLATE: &str = r#"You are an expert prompt engineer. A user wants to create a classifieds post.
User's initial input context:
{context}

Based on this input, create an optimized and detailed prompt for another AI assistant. This optimized prompt must instruct the second AI to:
1. Analyze the original user request text.
2. Determine the "listingType". This can be one of the following: "SELLING_ITEM", "WANTING_TO_BUY_ITEM", "WANTING_TO_OFFER_SERVICE", "OFFER_TO_BUY_SERVICE" or "UNKNOWN".
3. Generate a "suggestedTitle" (5-10 words, concise and appealing). The title should not mention the price.
4. Generate a "suggestedDescription" (1-3 informative sentences).
5. Extract the "extractedItemName" (the primary item or service).
6. Extract a "price" (as a number, or null if not explicitly stated in the user's text).
7. Extract a "currency" (e.g., "USD", "EUR", "CHF", or null if no price/currency is stated in the user's text).
8. Generate "suggestedCategories", which must be an array of up to 3 relevant categories chosen ONLY from the following list: [{categories}].
9. The second AI MUST return its findings as a VALID JSON object with exactly these keys and no other text, comments, or markdown formatting like ```json.
10. Make sure all fields are populated.
Return ONLY the text of the optimized prompt for the second AI. Do not include any explanations or conversational text in your own response.
Optimized Prompt for Second AI:"#;

/// The static instruction prompt for single-stage operation.
///
/// Placeholder: `{categories}`. Demands the same JSON contract the
/// meta-generated prompt does.
pub const STATIC_SUGGESTION_PROMPT: &str = r#"You are an assistant that turns a user's free-text request into a structured classifieds post.
Analyze the user request below and respond with:
1. "listingType": one of "SELLING_ITEM", "WANTING_TO_BUY_ITEM", "WANTING_TO_OFFER_SERVICE", "OFFER_TO_BUY_SERVICE" or "UNKNOWN".
2. "suggestedTitle": 5-10 words, concise and appealing, without the price.
3. "suggestedDescription": 1-3 informative sentences.
4. "extractedItemName": the primary item or service.
5. "price": a number, or null if not explicitly stated.
6. "currency": e.g. "USD", "EUR", "CHF", or null if no price/currency is stated.
7. "suggestedCategories": an array of up to 3 relevant categories chosen ONLY from the following list: [{categories}].
Return a VALID JSON object with exactly these keys and no other text, comments, or markdown formatting like ```json."#;

/// Builds the textual summary of the client's fields that is embedded in the
/// meta-prompt.
fn build_meta_context(request: &ClientRequest) -> String {
    let text = request.text.as_deref().unwrap_or_default();
    let mut context = format!("User text: \"{text}\"\n");
    if let Some(image_urls) = &request.image_urls {
        if !image_urls.is_empty() {
            context.push_str(&format!(
                "User has provided {} image(s).\n",
                image_urls.len()
            ));
        }
    }
    if let Some(price) = &request.base_offer_price {
        let currency = request.base_offer_currency.as_deref().unwrap_or_default();
        context.push_str(&format!(
            "User has indicated a base offer/price of {price} {currency}.\n"
        ));
    }
    context
}

/// Builds the complete meta-prompt for the first model call.
pub fn build_meta_prompt(request: &ClientRequest) -> String {
    META_PROMPT_TEMPLATE
        .replace("{context}", &build_meta_context(request))
        .replace("{categories}", &LISTING_CATEGORIES.join(", "))
}

/// Builds the static single-stage instruction prompt.
pub fn build_static_prompt() -> String {
    STATIC_SUGGESTION_PROMPT.replace("{categories}", &LISTING_CATEGORIES.join(", "))
}

/// Combines the stage-one instructions with the literal user text into the
/// final prompt for the suggestion call.
pub fn build_final_prompt(instructions: &str, user_text: &str) -> String {
    format!("{instructions}\n\nUser Request: \"{user_text}\"\n\nJSON Output:\n")
}
