//! Citation validation relay.

use crate::{
    AppState,
    relay::{self, CITATION_VALIDATION, RelayError, RelayRejection},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use pasalku_probe::resolver::join_url;
use serde_json::Value;

/// Forward a citation to the backend's validator and relay its answer.
///
/// The body must carry a non-empty `citation`; everything else is passed
/// through untouched.
#[utoipa::path(
    post,
    path = "/api/citations/validate",
    request_body = crate::types::CitationRequest,
    responses(
        (status = 200, description = "Backend validation result, relayed verbatim", body = Object),
        (status = 400, description = "Missing citation or malformed body", body = crate::types::ErrorBody),
        (status = 500, description = "Backend call failed", body = crate::types::RelayErrorBody)
    ),
    tag = "relay"
)]
pub async fn validate_citation(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, RelayRejection> {
    let Json(body) = payload.map_err(|e| RelayRejection {
        route: &CITATION_VALIDATION,
        error: RelayError::InvalidBody(e.body_text()),
    })?;

    let config = state.config_manager.config();
    let url = join_url(
        &config.backend.resolve_base_url(),
        &config.relay.citation_validate_path,
    );

    relay::relay(
        &state.relay_client,
        &CITATION_VALIDATION,
        &url,
        config.relay.timeout(),
        body,
    )
    .await
    .map(Json)
}
