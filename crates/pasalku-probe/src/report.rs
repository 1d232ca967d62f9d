//! Aggregation of probe attempts into the status payload.

use crate::types::{BackendKind, ProbeAttempt};
use serde::{Deserialize, Serialize};

/// Result of a full probe cycle, serialized verbatim at the HTTP boundary.
///
/// ```json
/// { "connected": true, "url": "http://localhost:8000", "kind": "real",
///   "endpointTried": ["http://localhost:8000/api/health"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusReport {
    /// True iff some candidate answered with 2xx.
    pub connected: bool,
    /// Configured base URL (not a per-endpoint URL).
    #[serde(rename = "url")]
    pub resolved_url: String,
    /// Label of the first successful candidate.
    pub kind: BackendKind,
    /// Every dispatched URL, in dispatch order.
    #[serde(rename = "endpointTried")]
    pub attempted_endpoints: Vec<String>,
}

impl StatusReport {
    /// Build the report for `base_url` from the executor's attempts.
    pub fn from_attempts(base_url: &str, attempts: &[ProbeAttempt]) -> Self {
        let kind = attempts
            .iter()
            .find(|attempt| attempt.outcome.is_success())
            .map(|attempt| attempt.target.kind)
            .unwrap_or(BackendKind::Unknown);

        Self {
            connected: kind != BackendKind::Unknown,
            resolved_url: base_url.to_string(),
            kind,
            attempted_endpoints: attempts
                .iter()
                .map(|attempt| attempt.target.url.clone())
                .collect(),
        }
    }
}
