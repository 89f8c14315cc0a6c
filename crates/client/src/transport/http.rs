//! HTTP transport layer for the school API client.

use crate::config::ClientConfig;
use crate::error::{SchoolApiError, SchoolApiResult};
use reqwest::{redirect, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport for making upstream requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> SchoolApiResult<Self> {
        // Redirects are surfaced as upstream failures, never followed.
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given endpoint path, relative to the base URL.
    fn build_url(&self, path: &str) -> SchoolApiResult<url::Url> {
        self.config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(SchoolApiError::InvalidUrl)
    }

    /// Send a request once. Non-success statuses become `Upstream` errors.
    async fn execute(&self, request_builder: RequestBuilder) -> SchoolApiResult<Response> {
        let response = request_builder
            .send()
            .await
            .map_err(SchoolApiError::from_reqwest)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "Failed to read upstream error body");
                String::new()
            }
        };
        warn!(status = status.as_u16(), "Upstream request failed");
        Err(SchoolApiError::from_response(status.as_u16(), body))
    }

    /// Decode a response body as JSON without reshaping it.
    async fn decode<T: DeserializeOwned>(response: Response) -> SchoolApiResult<T> {
        let text = response.text().await.map_err(SchoolApiError::from_reqwest)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Execute a GET request with query parameters. Parameters are encoded
    /// in the field order of `query`.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> SchoolApiResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        let response = self.execute(self.client.get(url).query(query)).await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
        value: i32,
    }

    #[derive(Debug, Serialize)]
    struct TestQuery {
        name: String,
    }

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig::new(url::Url::parse(base_url).unwrap()))
    }

    async fn fetch<T: DeserializeOwned>(transport: &HttpTransport, path: &str) -> SchoolApiResult<T> {
        let query = TestQuery {
            name: "test".to_string(),
        };
        transport.get_with_query(path, &query).await
    }

    #[tokio::test]
    async fn test_get_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/school"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "success".to_string(),
                value: 42,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TestResponse = fetch(&transport, "/school").await.unwrap();
        assert_eq!(result.message, "success");
        assert_eq!(result.value, 42);
    }

    #[tokio::test]
    async fn test_get_with_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/school"))
            .and(query_param("name", "test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "found".to_string(),
                value: 1,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let query = TestQuery {
            name: "test".to_string(),
        };
        let result: TestResponse = transport.get_with_query("school", &query).await.unwrap();
        assert_eq!(result.message, "found");
    }

    #[tokio::test]
    async fn test_user_agent_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("user-agent", "school-mcp-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let mut config = ClientConfig::new(url::Url::parse(&server.uri()).unwrap());
        config.user_agent = "school-mcp-test".to_string();
        let transport = HttpTransport::new(Arc::new(config)).unwrap();

        let result: serde_json::Value = fetch(&transport, "/anything").await.unwrap();
        assert_eq!(result, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such school"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let err = fetch::<serde_json::Value>(&transport, "/missing")
            .await
            .unwrap_err();
        match err {
            SchoolApiError::Upstream { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such school");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_redirect_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/school"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/elsewhere"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/elsewhere"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"redirected": true}])))
            .expect(0)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let err = fetch::<serde_json::Value>(&transport, "/school").await.unwrap_err();
        assert!(matches!(err, SchoolApiError::Upstream { status: 302, .. }));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let err = fetch::<serde_json::Value>(&transport, "/school").await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let err = fetch::<serde_json::Value>(&transport, "/lunch").await.unwrap_err();
        assert!(matches!(err, SchoolApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let mut config = ClientConfig::new(url::Url::parse(&server.uri()).unwrap());
        config.timeout = Duration::from_millis(100);
        let transport = HttpTransport::new(Arc::new(config)).unwrap();

        let err = fetch::<serde_json::Value>(&transport, "/timetable").await.unwrap_err();
        assert!(matches!(err, SchoolApiError::Timeout));
    }

    #[tokio::test]
    async fn test_build_url() {
        let transport = HttpTransport::new(create_config("http://localhost:8080")).unwrap();

        let url = transport.build_url("/school").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/school");
    }

    #[tokio::test]
    async fn test_build_url_keeps_path_prefix() {
        let transport = HttpTransport::new(create_config("http://localhost:8080/api")).unwrap();

        let url = transport.build_url("/school").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/school");
    }
}
