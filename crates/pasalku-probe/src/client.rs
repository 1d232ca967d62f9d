//! Health check client implementations
//!
//! The executor only needs a status code back from a GET. The production
//! implementation is reqwest-based.

use crate::error::{Error, Result, TransportError};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::trace;

/// HTTP client used for health GETs.
///
/// # Implementation Requirements
/// * Must use GET
/// * Must bypass any response cache
/// * Must not follow redirects (a 3xx is a non-2xx answer)
/// * Must honour `timeout`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthClient: Send + Sync {
    /// Issue a GET to `url` and return the response status code.
    async fn get_status(&self, url: &str, timeout: Duration) -> std::result::Result<u16, TransportError>;
}

/// Production health client backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHealthClient {
    client: reqwest::Client,
}

impl ReqwestHealthClient {
    /// Build a client with caching and redirects disabled.
    pub fn new(user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::Client(format!("Failed to create health check client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HealthClient for ReqwestHealthClient {
    async fn get_status(&self, url: &str, timeout: Duration) -> std::result::Result<u16, TransportError> {
        trace!(url, "sending health GET");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| match TransportError::from(e) {
                TransportError::Timeout(_) => TransportError::Timeout(timeout),
                other => other,
            })?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_returns_status_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ReqwestHealthClient::new("test-agent").unwrap();
        let status = client
            .get_status(&format!("{}/health", server.uri()), Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(status, 503);
    }

    #[tokio::test]
    async fn test_sends_no_cache_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .and(header("pragma", "no-cache"))
            .and(header("user-agent", "test-agent"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReqwestHealthClient::new("test-agent").unwrap();
        let status = client
            .get_status(&format!("{}/api/health", server.uri()), Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn test_redirect_not_followed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("location", "/elsewhere"),
            )
            .mount(&server)
            .await;

        let client = ReqwestHealthClient::new("test-agent").unwrap();
        let status = client
            .get_status(&format!("{}/health", server.uri()), Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(status, 302);
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = ReqwestHealthClient::new("test-agent").unwrap();
        let timeout = Duration::from_millis(100);
        let err = client
            .get_status(&format!("{}/health", server.uri()), timeout)
            .await
            .unwrap_err();

        assert_eq!(err, TransportError::Timeout(timeout));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop a listener so the port is closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ReqwestHealthClient::new("test-agent").unwrap();
        let result = client
            .get_status(&format!("http://{}/health", addr), Duration::from_secs(2))
            .await;

        assert!(matches!(result, Err(TransportError::Connect(_))));
    }
}
