//! # pasalku-probe
//!
//! Backend reachability probing with an ordered fallback chain.
//!
//! Given a backend base URL, the prober tries each configured health
//! endpoint in priority order (by default the full backend's `/api/health`,
//! then the minimal backend's `/health`) and stops at the first 2xx. The
//! result is a [`StatusReport`] saying whether anything answered, which
//! flavour it was, and which URLs were dispatched.
//!
//! Probing never fails: DNS errors, refused connections, timeouts and
//! non-2xx answers are all folded into the report.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pasalku_probe::{probe_backend, ProbeConfig, ReqwestHealthClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pasalku_probe::Error> {
//!     let config = ProbeConfig::default();
//!     let client = ReqwestHealthClient::new(&config.user_agent)?;
//!
//!     let report = probe_backend("http://localhost:8000", &config, &client).await;
//!     println!("{} ({})", report.connected, report.kind);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! base URL ──► resolver ──► [ProbeTarget...] ──► executor ──► [ProbeAttempt...] ──► report
//!                                                   │
//!                                             HealthClient (reqwest)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod report;
pub mod resolver;
pub mod types;

// Re-exports for convenience
pub use client::{HealthClient, ReqwestHealthClient};
pub use config::{DEFAULT_BACKEND_URL, ProbeConfig, TargetSpec};
pub use error::{Error, Result, TransportError};
pub use executor::ProbeExecutor;
pub use report::StatusReport;
pub use types::{BackendKind, ProbeAttempt, ProbeOutcome, ProbeTarget};

use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Run one full probe cycle against `base_url`.
///
/// Resolves the candidates from `config.targets`, tries them in order with
/// `config.timeout()` per attempt, and aggregates the attempts.
pub async fn probe_backend(
    base_url: &str,
    config: &ProbeConfig,
    client: &dyn HealthClient,
) -> StatusReport {
    let probe_id = Uuid::new_v4();
    let span = info_span!("probe", %probe_id, base_url);

    async move {
        let targets = resolver::resolve_targets(base_url, &config.targets);
        let attempts = ProbeExecutor::new(client, config.timeout())
            .execute(&targets)
            .await;
        let report = StatusReport::from_attempts(base_url, &attempts);

        info!(
            connected = report.connected,
            kind = %report.kind,
            attempts = report.attempted_endpoints.len(),
            "probe cycle complete"
        );

        report
    }
    .instrument(span)
    .await
}
