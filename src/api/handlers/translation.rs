//! Language detection relay.

use crate::{
    AppState,
    relay::{self, LANGUAGE_DETECTION, RelayError, RelayRejection},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use pasalku_probe::resolver::join_url;
use serde_json::Value;

/// Forward text to the backend's language detector and relay its answer.
#[utoipa::path(
    post,
    path = "/api/translation/detect",
    request_body = crate::types::LanguageDetectRequest,
    responses(
        (status = 200, description = "Detected language, relayed verbatim", body = Object),
        (status = 400, description = "Missing text or malformed body", body = crate::types::ErrorBody),
        (status = 500, description = "Backend call failed", body = crate::types::RelayErrorBody)
    ),
    tag = "relay"
)]
pub async fn detect_language(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, RelayRejection> {
    let Json(body) = payload.map_err(|e| RelayRejection {
        route: &LANGUAGE_DETECTION,
        error: RelayError::InvalidBody(e.body_text()),
    })?;

    let config = state.config_manager.config();
    let url = join_url(
        &config.backend.resolve_base_url(),
        &config.relay.language_detect_path,
    );

    relay::relay(
        &state.relay_client,
        &LANGUAGE_DETECTION,
        &url,
        config.relay.timeout(),
        body,
    )
    .await
    .map(Json)
}
