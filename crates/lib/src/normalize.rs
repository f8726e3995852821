//! # Response Normalization
//!
//! Turns the suggestion call's raw reply into a validated [`Suggestions`]
//! record or a classified failure. The pipeline is strictly ordered:
//! presence check, direct JSON parse, best-effort fallback extraction,
//! required-key validation, enum coercion, and numeric coercion. Every
//! failure is terminal; nothing here retries the model.

use crate::{
    errors::SuggestError,
    providers::ai::ModelReply,
    types::{ListingType, Suggestions},
};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Keys that must be present in the parsed reply. `suggestedCategories` is
/// the only one of these that may be null; `price` and `currency` may be
/// null or absent entirely.
const REQUIRED_KEYS: [&str; 5] = [
    "listingType",
    "suggestedTitle",
    "suggestedDescription",
    "extractedItemName",
    "suggestedCategories",
];

/// First-match-wins extractor: a ```json fenced block, else the first
/// `{...}` span. Deliberately a best-effort regex scan, not a JSON-aware
/// tokenizer; anything it cannot recover falls through to
/// `UnparseableResponse`.
fn extraction_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```json\s*([\s\S]*?)\s*```|(\{[\s\S]*\})").unwrap())
}

/// Normalizes a raw model reply into a validated `Suggestions` record.
pub fn normalize_reply(reply: &ModelReply) -> Result<Suggestions, SuggestError> {
    let text = match reply
        .text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
    {
        Some(text) => text,
        None => {
            if let Some(reason) = reply.finish_reason.as_deref() {
                if !reason.eq_ignore_ascii_case("stop") {
                    return Err(SuggestError::GenerationStopped(reason.to_string()));
                }
            }
            return Err(SuggestError::EmptyResponse);
        }
    };

    let value = match parse_object(text) {
        Some(value) => value,
        None => {
            debug!("Direct JSON parse failed, attempting fallback extraction");
            extract_json_fallback(text)?
        }
    };

    for key in REQUIRED_KEYS {
        let valid = match value.get(key) {
            None => false,
            Some(Value::Null) => key == "suggestedCategories",
            Some(_) => true,
        };
        if !valid {
            return Err(SuggestError::MissingField(key.to_string()));
        }
    }

    let listing_type = match value
        .get("listingType")
        .and_then(Value::as_str)
        .and_then(ListingType::from_wire)
    {
        Some(listing_type) => listing_type,
        None => {
            warn!(
                value = %value["listingType"],
                "Invalid listingType from model, defaulting to UNKNOWN"
            );
            ListingType::Unknown
        }
    };

    let price = match value.get("price") {
        None | Some(Value::Null) => None,
        Some(Value::Number(number)) => number.as_f64(),
        Some(other) => {
            warn!(value = %other, "Price from model is not a number, setting to null");
            None
        }
    };

    let currency = match value.get("currency") {
        None | Some(Value::Null) => None,
        Some(Value::String(currency)) => Some(currency.clone()),
        Some(other) => {
            warn!(value = %other, "Currency from model is not a string, setting to null");
            None
        }
    };

    let suggested_categories = match value.get("suggestedCategories") {
        None | Some(Value::Null) => None,
        Some(Value::Array(entries)) => Some(
            entries
                .iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect(),
        ),
        Some(other) => {
            warn!(value = %other, "suggestedCategories from model is not an array, setting to null");
            None
        }
    };

    Ok(Suggestions {
        listing_type,
        suggested_title: require_string(&value, "suggestedTitle")?,
        suggested_description: require_string(&value, "suggestedDescription")?,
        extracted_item_name: require_string(&value, "extractedItemName")?,
        price,
        currency,
        suggested_categories,
    })
}

/// Parses `text` as a single JSON object; anything else is a parse miss.
fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
}

/// Recovers a JSON object from a reply that is not itself valid JSON.
fn extract_json_fallback(raw: &str) -> Result<Value, SuggestError> {
    let captures = extraction_regex()
        .captures(raw)
        .ok_or_else(|| SuggestError::UnparseableResponse(raw.to_string()))?;
    let snippet = captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|capture| capture.as_str().trim())
        .ok_or_else(|| SuggestError::UnparseableResponse(raw.to_string()))?;
    parse_object(snippet).ok_or_else(|| SuggestError::UnparseableResponse(raw.to_string()))
}

/// Reads a required string field, classifying a wrong-typed value the same
/// way as a missing one.
fn require_string(value: &Value, key: &str) -> Result<String, SuggestError> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SuggestError::MissingField(key.to_string()))
}
