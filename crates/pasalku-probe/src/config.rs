//! Configuration for pasalku-probe.

use crate::error::{Error, Result};
use crate::types::BackendKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Base URL used when no backend is configured anywhere.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Health path exposed by the full backend.
pub const REAL_HEALTH_PATH: &str = "/api/health";

/// Health path exposed by the minimal/mock backend.
pub const MOCK_HEALTH_PATH: &str = "/health";

/// One configured candidate: a kind label and the path appended to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Label reported when this candidate answers.
    pub kind: BackendKind,
    /// Path appended to the normalized base URL.
    pub path: String,
}

impl TargetSpec {
    /// Create a new target spec.
    pub fn new(kind: BackendKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Probe behaviour: deadline, user agent and ordered candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Per-attempt deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent with every health request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Candidates in priority order.
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetSpec>,
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_user_agent() -> String {
    format!("pasalku-gateway-probe/{}", env!("CARGO_PKG_VERSION"))
}

/// The real-then-mock candidate list.
pub fn default_targets() -> Vec<TargetSpec> {
    vec![
        TargetSpec::new(BackendKind::Real, REAL_HEALTH_PATH),
        TargetSpec::new(BackendKind::Mock, MOCK_HEALTH_PATH),
    ]
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            targets: default_targets(),
        }
    }
}

impl ProbeConfig {
    /// Per-attempt deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Set the per-attempt deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Replace the candidate list.
    pub fn with_targets(mut self, targets: Vec<TargetSpec>) -> Self {
        self.targets = targets;
        self
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(Error::Configuration(
                "probe timeout_ms must be greater than zero".to_string(),
            ));
        }

        if self.targets.is_empty() {
            return Err(Error::Configuration(
                "at least one probe target is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.kind == BackendKind::Unknown {
                return Err(Error::Configuration(format!(
                    "probe target '{}' cannot use kind 'unknown'",
                    target.path
                )));
            }
            if target.path.trim().is_empty() {
                return Err(Error::Configuration(format!(
                    "probe target of kind '{}' has an empty path",
                    target.kind
                )));
            }
            if !seen.insert(target.kind) {
                return Err(Error::Configuration(format!(
                    "duplicate probe target kind '{}'",
                    target.kind
                )));
            }
        }

        Ok(())
    }
}
