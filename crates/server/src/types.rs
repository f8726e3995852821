use listify::Suggestions;
use serde::{Deserialize, Serialize};

/// The success envelope returned by `POST /suggestions`.
#[derive(Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub success: bool,
    pub data: Suggestions,
}
