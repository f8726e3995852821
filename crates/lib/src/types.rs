use crate::{errors::SuggestError, providers::ai::AiProvider};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The raw request body sent by a client asking for listing suggestions.
///
/// Only `text` is semantically required; it is validated (non-empty after
/// trimming) by [`SuggestionClient::generate_suggestions`] rather than at
/// deserialization time, so a missing field surfaces as a classified
/// input error instead of a body-rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    #[serde(default)]
    pub base_offer_price: Option<String>,
    #[serde(default)]
    pub base_offer_currency: Option<String>,
}

/// The closed set of listing kinds the service recognizes.
///
/// `Unknown` is the safe fallback: any out-of-set value coming back from the
/// model is coerced to it during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingType {
    SellingItem,
    WantingToBuyItem,
    WantingToOfferService,
    OfferToBuyService,
    Unknown,
}

impl ListingType {
    /// Parses the wire representation used by the model contract.
    ///
    /// Returns `None` for anything outside the closed set so the caller can
    /// decide the coercion policy.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "SELLING_ITEM" => Some(Self::SellingItem),
            "WANTING_TO_BUY_ITEM" => Some(Self::WantingToBuyItem),
            "WANTING_TO_OFFER_SERVICE" => Some(Self::WantingToOfferService),
            "OFFER_TO_BUY_SERVICE" => Some(Self::OfferToBuyService),
            "UNKNOWN" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// The fully validated suggestion record returned to the caller.
///
/// Every field has passed the normalization pipeline: `listing_type` is
/// always a member of [`ListingType`], and `price` is numeric or absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    pub listing_type: ListingType,
    pub suggested_title: String,
    pub suggested_description: String,
    pub extracted_item_name: String,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub suggested_categories: Option<Vec<String>>,
}

/// A client that turns a [`ClientRequest`] into [`Suggestions`] by calling
/// the configured AI provider and normalizing its reply.
///
/// Built once at startup and shared for the process lifetime; it holds no
/// per-invocation state.
pub struct SuggestionClient {
    pub(crate) ai_provider: Box<dyn AiProvider>,
    pub(crate) meta_prompting: bool,
}

impl fmt::Debug for SuggestionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionClient")
            .field("ai_provider", &self.ai_provider)
            .field("meta_prompting", &self.meta_prompting)
            .finish_non_exhaustive()
    }
}

/// A builder for creating `SuggestionClient` instances.
pub struct SuggestionClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    meta_prompting: bool,
}

impl SuggestionClientBuilder {
    /// Creates a new builder with meta-prompting enabled.
    pub fn new() -> Self {
        Self {
            ai_provider: None,
            meta_prompting: true,
        }
    }

    /// Sets the AI provider used for both pipeline stages.
    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    /// Enables or disables the meta-prompting stage.
    ///
    /// When disabled, the static suggestion template is used directly and
    /// only a single outbound model call is made per invocation.
    pub fn meta_prompting(mut self, enabled: bool) -> Self {
        self.meta_prompting = enabled;
        self
    }

    /// Builds the `SuggestionClient`.
    ///
    /// Fails with [`SuggestError::MissingAiProvider`] if no provider was
    /// configured.
    pub fn build(self) -> Result<SuggestionClient, SuggestError> {
        let ai_provider = self.ai_provider.ok_or(SuggestError::MissingAiProvider)?;
        Ok(SuggestionClient {
            ai_provider,
            meta_prompting: self.meta_prompting,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_type_wire_round_trip() {
        for (wire, variant) in [
            ("SELLING_ITEM", ListingType::SellingItem),
            ("WANTING_TO_BUY_ITEM", ListingType::WantingToBuyItem),
            ("WANTING_TO_OFFER_SERVICE", ListingType::WantingToOfferService),
            ("OFFER_TO_BUY_SERVICE", ListingType::OfferToBuyService),
            ("UNKNOWN", ListingType::Unknown),
        ] {
            assert_eq!(ListingType::from_wire(wire), Some(variant));
            let serialized = serde_json::to_value(variant).unwrap();
            assert_eq!(serialized, serde_json::json!(wire));
        }
    }

    #[test]
    fn listing_type_rejects_out_of_set_values() {
        assert_eq!(ListingType::from_wire("NOT_A_REAL_TYPE"), None);
        assert_eq!(ListingType::from_wire("selling_item"), None);
    }

    #[test]
    fn client_request_deserializes_camel_case() {
        let request: ClientRequest = serde_json::from_str(
            r#"{"text":"Selling my bike","imageUrls":["a.jpg"],"baseOfferPrice":"20","baseOfferCurrency":"CHF"}"#,
        )
        .unwrap();
        assert_eq!(request.text.as_deref(), Some("Selling my bike"));
        assert_eq!(request.image_urls.as_deref(), Some(&["a.jpg".to_string()][..]));
        assert_eq!(request.base_offer_price.as_deref(), Some("20"));
        assert_eq!(request.base_offer_currency.as_deref(), Some("CHF"));
    }
}
