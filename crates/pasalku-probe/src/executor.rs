//! Ordered fallback probing.
//!
//! Candidates are tried one after another in priority order and the cycle
//! stops at the first 2xx. Every failure is absorbed into a
//! [`ProbeOutcome`] so a broken candidate never aborts the cycle.

use crate::client::HealthClient;
use crate::types::{ProbeAttempt, ProbeOutcome, ProbeTarget};
use std::time::{Duration, Instant};
use tracing::debug;

/// Runs probe cycles against a [`HealthClient`].
pub struct ProbeExecutor<'a> {
    client: &'a dyn HealthClient,
    timeout: Duration,
}

impl<'a> ProbeExecutor<'a> {
    /// Create an executor with a per-attempt deadline.
    pub fn new(client: &'a dyn HealthClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Try `targets` in order, stopping after the first success.
    ///
    /// The returned attempts are in dispatch order and contain exactly the
    /// targets that were dispatched.
    pub async fn execute(&self, targets: &[ProbeTarget]) -> Vec<ProbeAttempt> {
        let mut attempts = Vec::with_capacity(targets.len());

        for target in targets {
            let start = Instant::now();
            let outcome = self.attempt(target).await;
            let elapsed = start.elapsed();

            debug!(
                kind = %target.kind,
                url = %target.url,
                outcome = %outcome,
                elapsed_ms = elapsed.as_millis() as u64,
                "probe attempt finished"
            );

            let done = outcome.is_success();
            attempts.push(ProbeAttempt {
                target: target.clone(),
                outcome,
                elapsed,
            });

            if done {
                break;
            }
        }

        attempts
    }

    async fn attempt(&self, target: &ProbeTarget) -> ProbeOutcome {
        // Outer deadline in case a client implementation ignores its own
        let request = self.client.get_status(&target.url, self.timeout);
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(status)) => ProbeOutcome::from_status(status),
            Ok(Err(err)) => ProbeOutcome::NetworkFailure {
                reason: err.to_string(),
            },
            Err(_) => ProbeOutcome::NetworkFailure {
                reason: format!("timed out after {}ms", self.timeout.as_millis()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockHealthClient;
    use crate::config::default_targets;
    use crate::error::TransportError;
    use crate::resolver::resolve_targets;
    use crate::types::BackendKind;
    use mockall::predicate::eq;

    const BASE: &str = "http://backend.test";

    fn targets() -> Vec<ProbeTarget> {
        resolve_targets(BASE, &default_targets())
    }

    #[tokio::test]
    async fn test_real_success_short_circuits() {
        let mut client = MockHealthClient::new();
        client
            .expect_get_status()
            .withf(|url, _| url == "http://backend.test/api/health")
            .times(1)
            .returning(|_, _| Ok(200));
        client
            .expect_get_status()
            .withf(|url, _| url == "http://backend.test/health")
            .times(0);

        let executor = ProbeExecutor::new(&client, Duration::from_secs(1));
        let attempts = executor.execute(&targets()).await;

        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].target.kind, BackendKind::Real);
        assert_eq!(attempts[0].outcome, ProbeOutcome::Success { status: 200 });
    }

    #[tokio::test]
    async fn test_network_failure_falls_through_to_mock() {
        let mut client = MockHealthClient::new();
        client
            .expect_get_status()
            .withf(|url, _| url == "http://backend.test/api/health")
            .times(1)
            .returning(|_, _| Err(TransportError::Connect("connection refused".to_string())));
        client
            .expect_get_status()
            .withf(|url, _| url == "http://backend.test/health")
            .times(1)
            .returning(|_, _| Ok(204));

        let executor = ProbeExecutor::new(&client, Duration::from_secs(1));
        let attempts = executor.execute(&targets()).await;

        assert_eq!(attempts.len(), 2);
        assert!(matches!(
            attempts[0].outcome,
            ProbeOutcome::NetworkFailure { ref reason } if reason.contains("refused")
        ));
        assert_eq!(attempts[1].target.kind, BackendKind::Mock);
        assert_eq!(attempts[1].outcome, ProbeOutcome::Success { status: 204 });
    }

    #[tokio::test]
    async fn test_http_failure_keeps_status() {
        let mut client = MockHealthClient::new();
        client
            .expect_get_status()
            .withf(|url, _| url.ends_with("/api/health"))
            .returning(|_, _| Ok(500));
        client
            .expect_get_status()
            .withf(|url, _| url == "http://backend.test/health")
            .returning(|_, _| Ok(404));

        let executor = ProbeExecutor::new(&client, Duration::from_secs(1));
        let attempts = executor.execute(&targets()).await;

        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].outcome, ProbeOutcome::HttpFailure { status: 500 });
        assert_eq!(attempts[1].outcome, ProbeOutcome::HttpFailure { status: 404 });
    }

    #[tokio::test]
    async fn test_timeout_passed_to_client() {
        let timeout = Duration::from_millis(750);
        let mut client = MockHealthClient::new();
        client
            .expect_get_status()
            .with(eq("http://backend.test/api/health"), eq(timeout))
            .times(1)
            .returning(|_, _| Ok(200));

        let executor = ProbeExecutor::new(&client, timeout);
        executor.execute(&targets()).await;
    }

    struct HangingClient;

    #[async_trait::async_trait]
    impl HealthClient for HangingClient {
        async fn get_status(
            &self,
            _url: &str,
            _timeout: Duration,
        ) -> std::result::Result<u16, TransportError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_outer_deadline_bounds_hanging_client() {
        let executor = ProbeExecutor::new(&HangingClient, Duration::from_millis(200));
        let attempts = executor.execute(&targets()).await;

        assert_eq!(attempts.len(), 2);
        for attempt in &attempts {
            assert!(matches!(
                attempt.outcome,
                ProbeOutcome::NetworkFailure { ref reason } if reason.contains("timed out")
            ));
        }
    }

    #[tokio::test]
    async fn test_empty_targets() {
        let client = MockHealthClient::new();
        let executor = ProbeExecutor::new(&client, Duration::from_secs(1));
        assert!(executor.execute(&[]).await.is_empty());
    }
}
