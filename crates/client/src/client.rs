//! Main client for the school API.

use crate::api::*;
use crate::config::{default_user_agent, normalize_base_url, ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{SchoolApiError, SchoolApiResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for the school API. Cheap to clone; clones share one
/// connection pool.
#[derive(Debug, Clone)]
pub struct SchoolApiClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl SchoolApiClient {
    /// Create a new client builder.
    pub fn builder() -> SchoolApiClientBuilder {
        SchoolApiClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> SchoolApiResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the schools API.
    pub fn schools(&self) -> SchoolsApi<'_> {
        SchoolsApi::new(self)
    }

    /// Get the timetable API.
    pub fn timetable(&self) -> TimetableApi<'_> {
        TimetableApi::new(self)
    }

    /// Get the lunch API.
    pub fn lunch(&self) -> LunchApi<'_> {
        LunchApi::new(self)
    }

    /// Get the schedule API.
    pub fn schedule(&self) -> ScheduleApi<'_> {
        ScheduleApi::new(self)
    }
}

/// Builder for creating a SchoolApiClient.
pub struct SchoolApiClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl SchoolApiClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the base URL of the upstream API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> SchoolApiResult<SchoolApiClient> {
        let base_url_str = self
            .base_url
            .ok_or_else(|| SchoolApiError::Config("base_url is required".to_string()))?;

        let base_url = Url::parse(&base_url_str)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SchoolApiError::Config(format!(
                "unsupported base_url scheme: {}",
                base_url.scheme()
            )));
        }

        let config = ClientConfig {
            base_url: normalize_base_url(base_url),
            timeout: self.timeout,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
        };

        SchoolApiClient::from_config(config)
    }
}

impl Default for SchoolApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SchoolApiClient {
        SchoolApiClient::builder()
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    async fn last_query(server: &MockServer) -> Option<String> {
        let requests = server.received_requests().await.unwrap();
        requests.last().and_then(|r| r.url.query().map(str::to_string))
    }

    #[test]
    fn test_builder_requires_base_url() {
        let err = SchoolApiClient::builder().build().unwrap_err();
        assert!(matches!(err, SchoolApiError::Config(_)));
    }

    #[test]
    fn test_builder_rejects_non_http_scheme() {
        let err = SchoolApiClient::builder()
            .base_url("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, SchoolApiError::Config(_)));
    }

    #[test]
    fn test_builder_applies_settings() {
        let client = SchoolApiClient::builder()
            .base_url("https://example.com/api")
            .timeout(Duration::from_secs(5))
            .user_agent("ua/1")
            .build()
            .unwrap();

        assert_eq!(client.config().base_url.as_str(), "https://example.com/api/");
        assert_eq!(client.config().timeout, Duration::from_secs(5));
        assert_eq!(client.config().user_agent, "ua/1");
    }

    #[tokio::test]
    async fn test_search_school_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/school"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "Hanbit"}])))
            .mount(&server)
            .await;

        let result = client_for(&server).schools().search("Hanbit").await.unwrap();

        assert_eq!(result, json!([{"name": "Hanbit"}]));
        assert_eq!(last_query(&server).await.as_deref(), Some("schoolname=Hanbit"));
    }

    #[tokio::test]
    async fn test_classes_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let result = client_for(&server).schools().classes(3, "B10").await.unwrap();

        assert_eq!(result, json!([]));
        assert_eq!(last_query(&server).await.as_deref(), Some("grade=3&schoolcode=B10"));
    }

    #[tokio::test]
    async fn test_timetable_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/timetable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let query = TimetableQuery {
            grade: 5,
            class_number: 2,
            week: 0,
            school_code: "ABC".to_string(),
        };
        let result = client_for(&server).timetable().get(&query).await.unwrap();

        assert_eq!(result, json!({}));
        assert_eq!(
            last_query(&server).await.as_deref(),
            Some("grade=5&classno=2&week=0&schoolcode=ABC")
        );
    }

    #[tokio::test]
    async fn test_lunch_and_schedule_queries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let range = DateRangeQuery::new("20240301", "20240331", "ABC");

        client.lunch().menu(&range).await.unwrap();
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.path(), "/lunch");
        assert_eq!(
            requests[0].url.query(),
            Some("startdate=20240301&enddate=20240331&schoolcode=ABC")
        );

        client.schedule().events(&range).await.unwrap();
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[1].url.path(), "/schedule");
        assert_eq!(
            requests[1].url.query(),
            Some("startdate=20240301&enddate=20240331&schoolcode=ABC")
        );
    }

    #[tokio::test]
    async fn test_query_values_are_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        client_for(&server).schools().search("a&b c").await.unwrap();

        assert_eq!(last_query(&server).await.as_deref(), Some("schoolname=a%26b+c"));
    }
}
