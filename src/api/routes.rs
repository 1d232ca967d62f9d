use crate::AppState;
use crate::api::{docs::ApiDoc, handlers};
use crate::utils::toml_config::ServerConfig;
use axum::{
    Json, Router,
    body::Body,
    http::Response,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Routes mounted under `/api`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/status", get(handlers::status::backend_status))
        .route("/backend-status", get(handlers::status::backend_status))
        .route(
            "/citations/validate",
            post(handlers::citations::validate_citation),
        )
        .route(
            "/translation/detect",
            post(handlers::translation::detect_language),
        )
        .route(
            "/assistant/state",
            get(handlers::assistant::get_state)
                .put(handlers::assistant::update_state)
                .delete(handlers::assistant::reset_state),
        )
}

/// Full application: API routes, liveness, OpenAPI document and layers.
pub fn app(state: AppState) -> Router {
    let server = state.config_manager.config().server.clone();

    Router::new()
        .nest("/api", create_router())
        .route("/health", get(handlers::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback(handlers::health::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&server))
                .layer(CompressionLayer::new())
                .map_response(|res: Response<_>| res.map(Body::new))
                .layer(RequestBodyLimitLayer::new(server.body_limit_bytes)),
        )
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Any origin when `cors_origins` is empty, otherwise exactly the listed ones.
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if server.cors_origins.is_empty() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(origins)
}
