use crate::types::AppError;
use axum::http::Uri;

/// Gateway liveness. Does not contact the backend.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Gateway is running", body = String)
    ),
    tag = "health"
)]
pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
