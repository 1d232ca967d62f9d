//! Common types for pasalku-probe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which flavour of backend answered a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Full backend exposing `/api/health`.
    Real,
    /// Minimal or mock backend exposing `/health`.
    Mock,
    /// No candidate answered.
    Unknown,
}

impl BackendKind {
    /// Lowercase label used on the wire and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Real => "real",
            BackendKind::Mock => "mock",
            BackendKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate health endpoint. Built fresh for every probe cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    /// Label reported when this candidate succeeds.
    pub kind: BackendKind,
    /// Fully resolved health URL.
    pub url: String,
}

impl ProbeTarget {
    /// Create a new target.
    pub fn new(kind: BackendKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }
}

/// Classified result of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A 2xx response was received.
    Success {
        /// HTTP status code.
        status: u16,
    },
    /// No response: DNS, connect, timeout or send failure.
    NetworkFailure {
        /// Human readable cause, kept for diagnostics.
        reason: String,
    },
    /// A non-2xx response was received.
    HttpFailure {
        /// HTTP status code.
        status: u16,
    },
}

impl ProbeOutcome {
    /// Classify a received HTTP status.
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            ProbeOutcome::Success { status }
        } else {
            ProbeOutcome::HttpFailure { status }
        }
    }

    /// Whether this outcome ends the probe cycle.
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    /// HTTP status, if a response was received at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Success { status } | ProbeOutcome::HttpFailure { status } => {
                Some(*status)
            }
            ProbeOutcome::NetworkFailure { .. } => None,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Success { status } => write!(f, "success ({})", status),
            ProbeOutcome::NetworkFailure { reason } => write!(f, "network failure: {}", reason),
            ProbeOutcome::HttpFailure { status } => write!(f, "http failure ({})", status),
        }
    }
}

/// A dispatched target together with how it went.
#[derive(Debug, Clone)]
pub struct ProbeAttempt {
    /// The target that was tried.
    pub target: ProbeTarget,
    /// Classified outcome.
    pub outcome: ProbeOutcome,
    /// Wall-clock time spent on the attempt.
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&BackendKind::Real).unwrap(), "\"real\"");
        assert_eq!(serde_json::to_string(&BackendKind::Mock).unwrap(), "\"mock\"");
        assert_eq!(
            serde_json::to_string(&BackendKind::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn test_outcome_from_status() {
        assert_eq!(
            ProbeOutcome::from_status(204),
            ProbeOutcome::Success { status: 204 }
        );
        assert_eq!(
            ProbeOutcome::from_status(301),
            ProbeOutcome::HttpFailure { status: 301 }
        );
        assert_eq!(
            ProbeOutcome::from_status(503),
            ProbeOutcome::HttpFailure { status: 503 }
        );
    }

    #[test]
    fn test_outcome_status_retained() {
        assert_eq!(ProbeOutcome::HttpFailure { status: 404 }.status(), Some(404));
        let network = ProbeOutcome::NetworkFailure {
            reason: "refused".to_string(),
        };
        assert_eq!(network.status(), None);
        assert!(!network.is_success());
    }
}
