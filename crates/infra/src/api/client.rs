//! Endpoint client - authenticated calls with error classification
//!
//! One logical call per invocation: build the URL, attach the bearer
//! credential, run the retrying transport under a deadline, then classify
//! the outcome into the error taxonomy. Stateless between calls; the
//! client-side rate governor is composed around this client by the tool
//! handler, never inside it, so both stay independently testable.

use finrelay_domain::{QueryParams, RelayConfig, RelayError, Result};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::params::serialize_query;
use crate::http::HttpClient;

/// Client for the remote market-data API.
pub struct EndpointClient {
    http: HttpClient,
    config: RelayConfig,
}

impl EndpointClient {
    /// Create a new endpoint client.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Config` if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: RelayConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .build()?;

        Ok(Self { http, config })
    }

    /// Perform one logical GET call and return the parsed JSON payload.
    ///
    /// # Errors
    ///
    /// Classifies every failure into the adapter taxonomy; see the crate
    /// error type for the full table. A missing credential fails
    /// immediately with `RelayError::Config` and no network attempt.
    pub async fn fetch(&self, path: &str, params: &QueryParams) -> Result<Value> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(RelayError::Config(
                "API key is not configured; set FINRELAY_API_KEY".into(),
            ));
        };

        let url = self.build_url(path, params);
        debug!(%url, "GET request");

        let request = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Accept", "application/json");

        // The outer deadline also covers retries and backoff; hitting it is
        // classified the same as a per-attempt timeout, regardless of the
        // remaining budget.
        let response = match tokio::time::timeout(self.config.timeout, self.http.send(request)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(err),
            Err(_) => return Err(RelayError::Timeout),
        };

        let payload = classify_response(response).await?;
        info!(path, "GET request successful");
        Ok(payload)
    }

    fn build_url(&self, path: &str, params: &QueryParams) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let query = serialize_query(params);

        if query.is_empty() {
            format!("{base}{path}")
        } else {
            format!("{base}{path}?{query}")
        }
    }
}

/// Map a transport-level response onto the error taxonomy.
async fn classify_response(response: Response) -> Result<Value> {
    let status = response.status();

    if status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|err| RelayError::Network(format!("Failed to read response body: {err}")))?;

        // Some endpoints answer 200 with no body at all; treat that as an
        // empty object rather than a parse failure.
        if body.trim().is_empty() {
            return Ok(json!({}));
        }

        return serde_json::from_str(&body).map_err(|err| RelayError::Parse(err.to_string()));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());

        let message = match retry_after {
            Some(seconds) => format!("retry after {seconds} seconds"),
            None => "the remote API throttled this client".to_string(),
        };
        return Err(RelayError::RateLimited(message));
    }

    let code = status.as_u16();
    let body = response.text().await.unwrap_or_default();
    let message =
        if body.is_empty() { format!("status {code}") } else { truncate_message(&body) };

    if status.is_client_error() {
        Err(RelayError::Client { status: code, message })
    } else if status.is_server_error() {
        Err(RelayError::Server { status: code, message })
    } else {
        Err(RelayError::Network(format!("Unexpected status {code}: {message}")))
    }
}

/// Remote error bodies can be arbitrarily large HTML pages; keep the
/// surfaced message bounded.
fn truncate_message(body: &str) -> String {
    const MAX_LEN: usize = 300;
    let trimmed = body.trim();
    if trimmed.len() <= MAX_LEN {
        trimmed.to_string()
    } else {
        let mut end = MAX_LEN;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &trimmed[..end])
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config_for(server: &MockServer) -> RelayConfig {
        RelayConfig {
            base_url: server.uri(),
            api_key: Some("test-token".to_string()),
            timeout: Duration::from_secs(5),
            max_attempts: 3,
            rate_limit: 100,
        }
    }

    fn client_for(server: &MockServer) -> EndpointClient {
        EndpointClient::new(config_for(server)).unwrap()
    }

    #[tokio::test]
    async fn missing_credential_fails_without_a_network_call() {
        let server = MockServer::start().await;
        let config = RelayConfig { api_key: None, ..config_for(&server) };
        let client = EndpointClient::new(config).unwrap();

        let err = client.fetch("/quote/AAPL", &QueryParams::new()).await.unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));

        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn attaches_bearer_and_accept_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote/AAPL"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"price": 189.5}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let payload = client.fetch("/quote/AAPL", &QueryParams::new()).await.unwrap();
        assert_eq!(payload["price"], json!(189.5));
    }

    #[tokio::test]
    async fn serialized_query_reaches_the_wire() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "apple"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let mut params = QueryParams::new();
        params.push("query", "apple");
        params.push("limit", 10_i64);

        let client = client_for(&server);
        client.fetch("/search", &params).await.unwrap();
    }

    #[tokio::test]
    async fn empty_success_body_becomes_an_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let payload = client.fetch("/quote/AAPL", &QueryParams::new()).await.unwrap();
        assert_eq!(payload, json!({}));
    }

    #[tokio::test]
    async fn unparsable_success_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.fetch("/quote/AAPL", &QueryParams::new()).await.unwrap_err();
        assert!(matches!(err, RelayError::Parse(_)));
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad symbol"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.fetch("/quote/NOPE", &QueryParams::new()).await.unwrap_err();

        match err {
            RelayError::Client { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("bad symbol"));
            }
            other => panic!("expected client error, got {other:?}"),
        }

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn rate_limit_reports_retry_after_seconds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.fetch("/quote/AAPL", &QueryParams::new()).await.unwrap_err();

        assert!(matches!(err, RelayError::RateLimited(_)));
        let message = err.to_string().to_lowercase();
        assert!(message.contains("rate limit"));
        assert!(message.contains("30"));

        // Never retried automatically.
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn rate_limit_without_header_still_mentions_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.fetch("/quote/AAPL", &QueryParams::new()).await.unwrap_err();
        assert!(err.to_string().to_lowercase().contains("rate limit"));
    }

    #[tokio::test]
    async fn server_errors_surface_after_the_retry_budget() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(3)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.fetch("/quote/AAPL", &QueryParams::new()).await.unwrap_err();

        match err {
            RelayError::Server { status, .. } => assert_eq!(status, 500),
            other => panic!("expected server error, got {other:?}"),
        }

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
    }

    #[tokio::test]
    async fn recovers_when_a_retry_succeeds() {
        let server = MockServer::start().await;
        let attempts = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        Mock::given(method("GET"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                if attempts_clone.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 0 {
                    ResponseTemplate::new(500)
                } else {
                    ResponseTemplate::new(200).set_body_string(r#"{"success": true}"#)
                }
            })
            .expect(2)
            .mount(&server)
            .await;

        let config = RelayConfig { max_attempts: 2, ..config_for(&server) };
        let client = EndpointClient::new(config).unwrap();

        let payload = client.fetch("/quote/AAPL", &QueryParams::new()).await.unwrap();
        assert_eq!(payload, json!({"success": true}));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
    }

    #[tokio::test]
    async fn deadline_overrun_is_a_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = RelayConfig {
            timeout: Duration::from_millis(100),
            max_attempts: 1,
            ..config_for(&server)
        };
        let client = EndpointClient::new(config).unwrap();

        let err = client.fetch("/quote/AAPL", &QueryParams::new()).await.unwrap_err();
        assert!(matches!(err, RelayError::Timeout));
        assert_eq!(err.to_string(), "Request timed out");
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(1_000);
        let message = truncate_message(&body);
        assert!(message.len() <= 310);
        assert!(message.ends_with("..."));
    }
}
