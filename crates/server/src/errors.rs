use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use listify::SuggestError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates the different kinds of errors that can occur
/// within the server, allowing them to be converted into appropriate HTTP
/// responses. The wire contract is a JSON body
/// `{"error": {"code": ..., "message": ...}}` where `code` is
/// `invalid-argument` for caller-input problems and `internal` for
/// everything else.
pub enum AppError {
    /// Errors originating from the `listify` pipeline.
    Suggest(SuggestError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

/// Conversion from `SuggestError` to `AppError`.
impl From<SuggestError> for AppError {
    fn from(err: SuggestError) -> Self {
        AppError::Suggest(err)
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_code, error_message) = match self {
            AppError::Suggest(err) => {
                // Log the original error for debugging purposes
                error!("SuggestError: {err:?}");
                match err {
                    SuggestError::EmptyInput => (
                        StatusCode::BAD_REQUEST,
                        "invalid-argument",
                        "Input 'text' is required.".to_string(),
                    ),
                    SuggestError::MissingAiProvider | SuggestError::ReqwestClientBuild(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal",
                        "Server is not configured correctly.".to_string(),
                    ),
                    SuggestError::AiRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        "internal",
                        format!("Request to AI provider failed: {e}"),
                    ),
                    SuggestError::AiDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        "internal",
                        format!("Failed to deserialize AI provider response: {e}"),
                    ),
                    SuggestError::AiApi(e) => (
                        StatusCode::BAD_GATEWAY,
                        "internal",
                        format!("AI provider error: {e}"),
                    ),
                    err @ (SuggestError::EmptyGeneratedPrompt
                    | SuggestError::GenerationStopped(_)
                    | SuggestError::EmptyResponse
                    | SuggestError::UnparseableResponse(_)
                    | SuggestError::MissingField(_)) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal",
                        err.to_string(),
                    ),
                }
            }
            AppError::Internal(err) => {
                error!("Internal server error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": error_message,
            },
        }));

        (status_code, body).into_response()
    }
}
