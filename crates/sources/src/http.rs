//! HTTP attraction sources.
//!
//! The backend serves the two lists from two endpoints:
//!
//! - `GET /ehproperties`: EH properties, keyed by id
//! - `GET /assocattractions`: associated attractions, same shape
//!
//! [`SourceConfig`] holds the base URL and request settings shared by both;
//! [`HttpAttractionSource`] fetches and parses one endpoint.

use crate::error::{Result, SourceError};
use crate::source::AttractionSource;
use async_trait::async_trait;
use data_loader::{Attraction, Ownership, parse_attractions};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
/// Path of the EH property list.
pub const EH_PROPERTIES_PATH: &str = "/ehproperties";
/// Path of the associated attraction list.
pub const ASSOC_ATTRACTIONS_PATH: &str = "/assocattractions";
/// Default user agent for backend requests.
pub const DEFAULT_USER_AGENT: &str = "heritage-map/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the HTTP sources.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL of the backend (e.g., `"http://localhost:3001"`).
    pub base_url: String,
    pub eh_properties_path: String,
    pub assoc_attractions_path: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            eh_properties_path: EH_PROPERTIES_PATH.to_string(),
            assoc_attractions_path: ASSOC_ATTRACTIONS_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SourceConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the two endpoint paths.
    pub fn with_paths(
        mut self,
        eh_properties: impl Into<String>,
        assoc_attractions: impl Into<String>,
    ) -> Self {
        self.eh_properties_path = eh_properties.into();
        self.assoc_attractions_path = assoc_attractions.into();
        self
    }

    /// Join the base URL and an endpoint path.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build the shared HTTP client.
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
            .map_err(SourceError::ClientBuild)
    }
}

/// Fetches one keyed attraction list over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAttractionSource {
    client: Client,
    name: String,
    url: String,
    /// Ownership tag the endpoint is documented to serve.
    expected: Ownership,
    timeout: Duration,
}

impl HttpAttractionSource {
    pub fn new(
        client: Client,
        name: impl Into<String>,
        url: impl Into<String>,
        expected: Ownership,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            name: name.into(),
            url: url.into(),
            expected,
            timeout,
        }
    }

    /// Source for the EH property endpoint.
    pub fn eh_properties(client: Client, config: &SourceConfig) -> Self {
        Self::new(
            client,
            "ehproperties",
            config.url_for(&config.eh_properties_path),
            Ownership::EhProperty,
            config.timeout,
        )
    }

    /// Source for the associated attraction endpoint.
    pub fn assoc_attractions(client: Client, config: &SourceConfig) -> Self {
        Self::new(
            client,
            "assocattractions",
            config.url_for(&config.assoc_attractions_path),
            Ownership::AssocAttraction,
            config.timeout,
        )
    }

    /// Both sources, sharing one client.
    pub fn pair(config: &SourceConfig) -> Result<(Self, Self)> {
        let client = config.build_client()?;
        Ok((
            Self::eh_properties(client.clone(), config),
            Self::assoc_attractions(client, config),
        ))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> SourceError {
        if error.is_timeout() {
            return SourceError::Timeout {
                url: self.url.clone(),
                timeout_secs: self.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return SourceError::Http {
                url: self.url.clone(),
                status: status.as_u16(),
            };
        }

        SourceError::Network {
            url: self.url.clone(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl AttractionSource for HttpAttractionSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<Attraction>> {
        debug!("Fetching {}", self.url);

        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let attractions = parse_attractions(&body, &self.url)?;

        let unexpected = attractions
            .iter()
            .filter(|a| a.ownership != self.expected)
            .count();
        if unexpected > 0 {
            warn!(
                "{} of {} records from {} are not tagged '{}'",
                unexpected,
                attractions.len(),
                self.url,
                self.expected
            );
        }

        info!("Fetched {} attractions from {}", attractions.len(), self.url);
        Ok(attractions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockBackend;

    #[test]
    fn test_url_for_joins_cleanly() {
        let config = SourceConfig::new("http://example.test/api/");
        assert_eq!(config.url_for("/ehproperties"), "http://example.test/api/ehproperties");
        assert_eq!(config.url_for("assocattractions"), "http://example.test/api/assocattractions");
    }

    #[test]
    fn test_config_defaults() {
        let config = SourceConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.eh_properties_path, EH_PROPERTIES_PATH);
        assert_eq!(config.assoc_attractions_path, ASSOC_ATTRACTIONS_PATH);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_builder() {
        let config = SourceConfig::new("http://x")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("tests")
            .with_paths("/a", "/b");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "tests");
        assert_eq!(config.url_for(&config.assoc_attractions_path), "http://x/b");
    }

    #[tokio::test]
    async fn test_fetch_eh_properties() {
        let backend = MockBackend::start()
            .await
            .route(
                EH_PROPERTIES_PATH,
                200,
                r#"{"1": {"name": "Dover Castle", "ownership": "ehProperty", "categories": ["Castle"]}}"#,
            );
        let (eh, _) = HttpAttractionSource::pair(&SourceConfig::new(backend.base_url())).unwrap();

        let attractions = eh.fetch().await.unwrap();
        assert_eq!(attractions.len(), 1);
        assert_eq!(attractions[0].id, "1");
        assert_eq!(attractions[0].ownership, Ownership::EhProperty);
        assert_eq!(eh.name(), "ehproperties");
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let backend = MockBackend::start().await;
        let (_, assoc) = HttpAttractionSource::pair(&SourceConfig::new(backend.base_url())).unwrap();

        match assoc.fetch().await.unwrap_err() {
            SourceError::Http { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with(ASSOC_ATTRACTIONS_PATH));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let backend = MockBackend::start()
            .await
            .route(EH_PROPERTIES_PATH, 200, "<html>oops</html>");
        let (eh, _) = HttpAttractionSource::pair(&SourceConfig::new(backend.base_url())).unwrap();

        assert!(matches!(eh.fetch().await, Err(SourceError::Decode(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Nothing listens on the discard port of the loopback interface.
        let config = SourceConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
        let (eh, _) = HttpAttractionSource::pair(&config).unwrap();

        assert!(matches!(
            eh.fetch().await,
            Err(SourceError::Network { .. } | SourceError::Timeout { .. })
        ));
    }
}
