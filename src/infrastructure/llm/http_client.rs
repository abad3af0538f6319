use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failure, before any HTTP status is available
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Raw HTTP response, status and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Trait for HTTP client operations (for mocking)
///
/// Non-2xx statuses are returned as responses, not errors; only transport
/// failures end up in `TransportError`.
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError>;

    /// GET a URL and return only its status code
    async fn get_status(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        timeout: Duration,
    ) -> Result<u16, TransportError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.client.post(url).timeout(timeout);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request.json(body).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }

    async fn get_status(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        timeout: Duration,
    ) -> Result<u16, TransportError> {
        let mut request = self.client.get(url).timeout(timeout);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        Ok(response.status().as_u16())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_json_returns_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({"model": "llama3"})))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/v1/chat/completions", server.uri());
        let response = client
            .post_json(
                &url,
                vec![("Authorization", "Bearer sk-test")],
                &serde_json::json!({"model": "llama3", "messages": []}),
                Duration::from_secs(5),
            )
            .await
            .unwrap();

        assert_eq!(response, HttpResponse::new(503, "overloaded"));
    }

    #[tokio::test]
    async fn test_post_json_timeout_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = HttpClient::new();
        let error = client
            .post_json(
                &server.uri(),
                vec![],
                &serde_json::json!({}),
                Duration::from_millis(100),
            )
            .await
            .unwrap_err();

        assert!(matches!(error, TransportError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = HttpClient::new();
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let error = client
            .get_status("http://127.0.0.1:9/models", vec![], Duration::from_secs(2))
            .await
            .unwrap_err();

        assert!(matches!(error, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn test_get_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;

        let client = HttpClient::new();
        let status = client
            .get_status(&format!("{}/v1/models", server.uri()), vec![], Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(status, 405);
    }
}
