use std::time::Duration;

use linkreach_common::ErrorClassification;
use linkreach_core::RemoteError;
use reqwest::{Client as ReqwestClient, Method, Request, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use crate::errors::{status_error, IntoRemoteError};

const MAX_BACKOFF_DOUBLINGS: u32 = 8;

/// Attempt budget and back-off curve for one gateway call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included. Never below one.
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, base_backoff: Duration::from_millis(200) }
    }
}

impl RetryPolicy {
    /// Wait before retry number `retry` (1-based): `base * 2^(retry-1)`,
    /// unless the server named its own delay.
    pub fn wait_before(&self, retry: u32, server_hint: Option<Duration>) -> Duration {
        server_hint.unwrap_or_else(|| {
            let doublings = retry.saturating_sub(1).min(MAX_BACKOFF_DOUBLINGS);
            self.base_backoff.saturating_mul(1 << doublings)
        })
    }
}

/// What to do with the result of one attempt
enum Attempt {
    Done(Result<Response, RemoteError>),
    RetryAfter(Option<Duration>),
}

/// Gateway HTTP client: reqwest plus timeouts and bounded retries.
///
/// Connection failures, timeouts, 5xx and 429 are retried; a 429's
/// `Retry-After` replaces the computed wait. Whatever status remains once the
/// budget is spent is handed back to the caller as a response.
#[derive(Clone)]
pub struct HttpClient {
    inner: ReqwestClient,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn new() -> Result<Self, RemoteError> {
        Self::builder().build()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.inner.request(method, url)
    }

    /// Send `builder`, retrying within the policy's budget.
    ///
    /// The builder's body must be cloneable (JSON and byte bodies are).
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
        let budget = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| RemoteError::Malformed("streaming request bodies cannot be retried".into()))?
                .build()
                .map_err(IntoRemoteError::into_remote)?;
            let last = attempt >= budget;

            match self.attempt(request, attempt, last).await {
                Attempt::Done(result) => return result,
                Attempt::RetryAfter(hint) => {
                    let wait = self.retry.wait_before(attempt, hint);
                    debug!(attempt, wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX), "http_retry_scheduled");
                    if !wait.is_zero() {
                        tokio::time::sleep(wait).await;
                    }
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(&self, request: Request, attempt: u32, last: bool) -> Attempt {
        let method = request.method().clone();
        let url = request.url().clone();

        match self.inner.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(attempt, %method, %url, %status, "http_response");
                if !last && is_retryable_status(status) {
                    let hint = status_error(status, response.headers(), None).retry_after();
                    return Attempt::RetryAfter(hint);
                }
                Attempt::Done(Ok(response))
            }
            Err(err) => {
                let retryable = err.is_timeout() || err.is_connect() || err.is_request();
                if !last && retryable {
                    debug!(attempt, %method, %url, error = %err, "http_transport_error");
                    return Attempt::RetryAfter(None);
                }
                warn!(attempt, %method, %url, error = %err, "http_request_abandoned");
                Attempt::Done(Err(err.into_remote()))
            }
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Builder for [`HttpClient`]
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    retry: RetryPolicy,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    /// Whole-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.retry.base_backoff = backoff;
        self
    }

    /// Fallback user agent for requests that do not set their own.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, RemoteError> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let inner = builder.build().map_err(IntoRemoteError::into_remote)?;
        Ok(HttpClient { inner, retry: self.retry })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn fast_client(attempts: u32) -> HttpClient {
        HttpClient::builder()
            .base_backoff(Duration::from_millis(5))
            .max_attempts(attempts)
            .build()
            .expect("http client")
    }

    async fn post(client: &HttpClient, server: &MockServer) -> Result<Response, RemoteError> {
        client.send(client.request(Method::POST, server.uri()).body("{}")).await
    }

    #[tokio::test]
    async fn ok_response_uses_one_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let response = post(&fast_client(3), &server).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unavailable_gateway_recovers_within_budget() {
        let server = MockServer::start().await;
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        Mock::given(method("POST"))
            .respond_with(move |_: &wiremock::Request| {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    ResponseTemplate::new(503)
                } else {
                    ResponseTemplate::new(200)
                }
            })
            .mount(&server)
            .await;

        let response = post(&fast_client(3), &server).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn throttled_response_is_returned_once_budget_is_spent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
            .expect(2)
            .mount(&server)
            .await;

        let response = post(&fast_client(2), &server).await.expect("response");
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422))
            .expect(1)
            .mount(&server)
            .await;

        let response = post(&fast_client(3), &server).await.expect("response");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn refused_connection_is_a_retryable_transport_error() {
        let addr = TcpListener::bind("127.0.0.1:0").expect("bind").local_addr().expect("addr");

        let client = fast_client(2);
        let err = client
            .send(client.request(Method::POST, format!("http://{addr}")))
            .await
            .unwrap_err();

        assert!(matches!(err, RemoteError::Transport { .. }), "got {err:?}");
        assert!(err.is_retryable());
    }

    #[test]
    fn waits_double_and_yield_to_server_hints() {
        let policy = RetryPolicy { max_attempts: 4, base_backoff: Duration::from_millis(10) };
        assert_eq!(policy.wait_before(1, None), Duration::from_millis(10));
        assert_eq!(policy.wait_before(3, None), Duration::from_millis(40));
        assert_eq!(policy.wait_before(2, Some(Duration::from_secs(7))), Duration::from_secs(7));
    }

    #[test]
    fn attempts_never_drop_below_one() {
        let client = HttpClient::builder().max_attempts(0).build().expect("http client");
        assert_eq!(client.retry_policy().max_attempts, 1);
    }
}
