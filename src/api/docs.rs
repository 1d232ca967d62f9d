use crate::api::handlers;
use utoipa::OpenApi;

/// OpenAPI document for every gateway route.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pasalku Gateway",
        description = "Backend reachability probe and JSON relay for the Pasalku.ai frontend"
    ),
    paths(
        handlers::status::backend_status,
        handlers::citations::validate_citation,
        handlers::translation::detect_language,
        handlers::assistant::get_state,
        handlers::assistant::update_state,
        handlers::assistant::reset_state,
        handlers::health::health_check,
    ),
    components(schemas(
        pasalku_probe::StatusReport,
        pasalku_probe::BackendKind,
        crate::types::CitationRequest,
        crate::types::LanguageDetectRequest,
        crate::types::ErrorBody,
        crate::types::RelayErrorBody,
        crate::assistant::AssistantState,
        crate::assistant::AssistantStatus,
        crate::assistant::AssistantStateUpdate,
    )),
    tags(
        (name = "status", description = "Backend reachability"),
        (name = "relay", description = "Forward-and-relay to the backend"),
        (name = "assistant", description = "Assistant avatar state"),
        (name = "health", description = "Gateway liveness")
    )
)]
pub struct ApiDoc;
