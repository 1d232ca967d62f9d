//! Backend status handler.

use crate::AppState;
use axum::{Json, extract::State};
use pasalku_probe::StatusReport;

/// Probe the configured backend and report which flavour answered.
///
/// Always answers `200`; an unreachable backend is reported with
/// `connected: false` and `kind: "unknown"`.
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Backend reachability report", body = StatusReport)
    ),
    tag = "status"
)]
pub async fn backend_status(State(state): State<AppState>) -> Json<StatusReport> {
    let config = state.config_manager.config();
    let base_url = config.backend.resolve_base_url();

    let report =
        pasalku_probe::probe_backend(&base_url, &config.probe, state.health_client.as_ref()).await;

    Json(report)
}
