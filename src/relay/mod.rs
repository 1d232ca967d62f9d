//! Forward-and-relay to the external backend
//!
//! Each relay route validates one required field, forwards the JSON body
//! unchanged to a fixed downstream path and hands the downstream JSON back.
//!
//! ```text
//! Validating Input ──► Forwarding ──► Relaying
//!        │                  │
//!        └──► 400           └──► Failing (500)
//! ```
//!
//! Unlike the prober, failures here are surfaced to the caller. Only a short
//! generic message and a one-line description leave the gateway; downstream
//! response bodies are never echoed.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reqwest::header;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

/// Static description of one relay endpoint.
#[derive(Debug)]
pub struct RelayRoute {
    /// Name used in logs
    pub name: &'static str,
    /// Field that must be present and non-empty in the request body
    pub required_field: &'static str,
    /// Generic message returned on downstream failure
    pub failure_message: &'static str,
}

/// Citation validation relay
pub const CITATION_VALIDATION: RelayRoute = RelayRoute {
    name: "citation_validation",
    required_field: "citation",
    failure_message: "Failed to validate citation",
};

/// Language detection relay
pub const LANGUAGE_DETECTION: RelayRoute = RelayRoute {
    name: "language_detection",
    required_field: "text",
    failure_message: "Failed to detect language",
};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Backend request timed out after {0}ms")]
    Timeout(u64),

    #[error("Backend unreachable: {0}")]
    Transport(String),

    #[error("Backend responded with HTTP {0}")]
    Downstream(u16),

    #[error("Backend returned invalid JSON: {0}")]
    InvalidResponse(String),
}

impl RelayError {
    /// Whether the caller is at fault (no downstream call was made).
    pub fn is_client_error(&self) -> bool {
        matches!(self, RelayError::InvalidBody(_) | RelayError::MissingField(_))
    }
}

/// A relay failure bound to the route it happened on.
#[derive(Debug)]
pub struct RelayRejection {
    pub route: &'static RelayRoute,
    pub error: RelayError,
}

impl IntoResponse for RelayRejection {
    fn into_response(self) -> Response {
        if self.error.is_client_error() {
            let body = json!({ "error": self.error.to_string() });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        let body = json!({
            "error": self.route.failure_message,
            "details": self.error.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Check that `field` is present, non-null and not a blank string.
pub fn require_field(body: &Value, field: &'static str) -> Result<(), RelayError> {
    let object = body
        .as_object()
        .ok_or_else(|| RelayError::InvalidBody("expected a JSON object".to_string()))?;

    match object.get(field) {
        None | Some(Value::Null) => Err(RelayError::MissingField(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(RelayError::MissingField(field)),
        Some(_) => Ok(()),
    }
}

/// HTTP client for downstream relay calls.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
}

impl RelayClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pasalku-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// POST `body` to `url` once and parse the JSON answer.
    pub async fn forward(
        &self,
        url: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<Value, RelayError> {
        let response = self
            .http
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RelayError::Timeout(timeout.as_millis() as u64)
                } else {
                    RelayError::Transport(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Downstream(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| RelayError::InvalidResponse(e.without_url().to_string()))
    }
}

/// Validate, forward and relay one request.
pub async fn relay(
    client: &RelayClient,
    route: &'static RelayRoute,
    url: &str,
    timeout: Duration,
    body: Value,
) -> Result<Value, RelayRejection> {
    let reject = |error| RelayRejection { route, error };

    require_field(&body, route.required_field).map_err(reject)?;

    debug!(route = route.name, url, "forwarding request");

    client.forward(url, &body, timeout).await.map_err(|error| {
        warn!(route = route.name, url, error = %error, "relay failed");
        reject(error)
    })
}
