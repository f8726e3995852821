//! # API Route Handlers
//!
//! This module contains the Axum handlers for the `listify-server`: the
//! root and health endpoints, and the suggestions endpoint that runs the
//! full prompt-and-normalize pipeline.

use crate::{errors::AppError, state::AppState, types::SuggestionsResponse};
use axum::{extract::State, Json};
use listify::ClientRequest;
use tracing::info;

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "listify server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for the `POST /suggestions` endpoint.
///
/// Accepts the client's free-text request, runs the suggestion pipeline,
/// and returns the `{success, data}` envelope. All failures surface through
/// [`AppError`] as classified JSON error bodies; nothing is retried here.
pub async fn suggestions_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ClientRequest>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    info!(
        has_text = payload.text.is_some(),
        image_count = payload.image_urls.as_deref().map_or(0, <[String]>::len),
        "Received suggestions request"
    );

    let suggestions = app_state
        .suggestion_client
        .generate_suggestions(&payload)
        .await?;

    Ok(Json(SuggestionsResponse {
        success: true,
        data: suggestions,
    }))
}
