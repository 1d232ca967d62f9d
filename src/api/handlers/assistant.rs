//! Assistant avatar state handlers.

use crate::{
    AppState,
    assistant::{AssistantState, AssistantStateUpdate},
    types::{AppError, Result},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

/// Get the avatar's current character and status.
#[utoipa::path(
    get,
    path = "/api/assistant/state",
    responses(
        (status = 200, description = "Current assistant state", body = AssistantState)
    ),
    tag = "assistant"
)]
pub async fn get_state(State(state): State<AppState>) -> Json<AssistantState> {
    Json(state.assistant.snapshot())
}

/// Partially update the avatar state.
#[utoipa::path(
    put,
    path = "/api/assistant/state",
    request_body = AssistantStateUpdate,
    responses(
        (status = 200, description = "Updated assistant state", body = AssistantState),
        (status = 400, description = "Empty update or invalid character", body = crate::types::ErrorBody)
    ),
    tag = "assistant"
)]
pub async fn update_state(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AssistantStateUpdate>, JsonRejection>,
) -> Result<Json<AssistantState>> {
    let Json(update) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let updated = state.assistant.apply(update)?;
    tracing::debug!(character = %updated.character, status = ?updated.status, "assistant state updated");

    Ok(Json(updated))
}

/// Reset the avatar to the default character, idle.
#[utoipa::path(
    delete,
    path = "/api/assistant/state",
    responses(
        (status = 200, description = "Default assistant state", body = AssistantState)
    ),
    tag = "assistant"
)]
pub async fn reset_state(State(state): State<AppState>) -> Json<AssistantState> {
    Json(state.assistant.reset())
}
