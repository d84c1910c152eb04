//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use url::Url;

use crate::api::{
    AgentsApi, AnalyticsApi, CollaborationApi, KeysApi, LlmApi, MessagesApi, StatusApi,
};
use crate::config::{API_KEY_ENV, ClientConfig, DEFAULT_BASE_URL};
use crate::error::{Error, ErrorResponse, Result};

/// Default timeout for authenticated requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for the unauthenticated status check.
const DEFAULT_STATUS_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// ThinkTank API client.
///
/// Cloning is cheap; clones share the underlying connection pool and
/// configuration, which never changes after construction.
///
/// # Example
///
/// ```no_run
/// use thinktank_client::ThinkTankClient;
///
/// # async fn example() -> thinktank_client::Result<()> {
/// let client = ThinkTankClient::builder()
///     .api_key("tt_live_123")
///     .build()?;
///
/// let agents = client.agents().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ThinkTankClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Base URL for API requests, always ending in `/`.
    pub(crate) base_url: Url,
    /// API key header value; `None` only for a [`PublicClient`].
    pub(crate) api_key: Option<HeaderValue>,
    /// Timeout for authenticated requests.
    pub(crate) timeout: Duration,
    /// Timeout for the status check.
    pub(crate) status_timeout: Duration,
}

impl std::fmt::Debug for ThinkTankClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThinkTankClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .field("status_timeout", &self.inner.status_timeout)
            .finish_non_exhaustive()
    }
}

impl ThinkTankClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client from explicit values, falling back to
    /// `THINKTANK_API_KEY`, `THINKTANK_API_URL` and the default base URL.
    ///
    /// Fails with [`Error::Config`] when no API key can be found.
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Result<Self> {
        Self::from_config(ClientConfig::resolve(api_key, base_url))
    }

    /// Create a client configured entirely from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env())
    }

    /// Create a client from an explicit configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        ClientBuilder::from_config(config).build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the service status API.
    pub fn status(&self) -> StatusApi {
        StatusApi::new(self.clone())
    }

    /// Access the API key API.
    pub fn keys(&self) -> KeysApi {
        KeysApi::new(self.clone())
    }

    /// Access the agents API.
    pub fn agents(&self) -> AgentsApi {
        AgentsApi::new(self.clone())
    }

    /// Access the messages API.
    pub fn messages(&self) -> MessagesApi {
        MessagesApi::new(self.clone())
    }

    /// Access the analytics API.
    pub fn analytics(&self) -> AnalyticsApi {
        AnalyticsApi::new(self.clone())
    }

    /// Access the collaboration (agent status and task) API.
    pub fn collaboration(&self) -> CollaborationApi {
        CollaborationApi::new(self.clone())
    }

    /// Access the LLM proxy API.
    pub fn llm(&self) -> LlmApi {
        LlmApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner.base_url.join(path).map_err(Error::from)
    }

    /// Start an authenticated request.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "ThinkTank request");
        let request = self
            .inner
            .http
            .request(method, url)
            .timeout(self.inner.timeout);
        Ok(match &self.inner.api_key {
            Some(key) => request.header(API_KEY_HEADER, key.clone()),
            None => request,
        })
    }

    /// Make a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path)?;
        self.send(request).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        self.send(request).await
    }

    /// Make a GET request without the API key header.
    pub(crate) async fn get_unauthenticated<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T> {
        let url = self.url(path)?;
        tracing::debug!(method = %Method::GET, %url, "ThinkTank request (unauthenticated)");
        let request = self
            .inner
            .http
            .get(url)
            .timeout(self.inner.status_timeout);
        self.send(request).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(request).await
    }

    /// Make a PUT request.
    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        self.send(request).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::DELETE, path)?;
        self.send(request).await
    }

    /// Send a prepared request and decode its response.
    async fn send<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle a response, extracting the body or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract an error from a failed response.
    async fn extract_error(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let url = response.url().clone();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Error::Http(e),
        };

        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| format!("HTTP {}", status));

        tracing::warn!(status, %url, %message, "ThinkTank request failed");

        Error::Api {
            status,
            message,
            body,
        }
    }
}

/// Client for the bootstrap endpoints that need no API key.
///
/// An agent without a key can check service status and generate its first
/// key, then switch to a full [`ThinkTankClient`].
///
/// ```no_run
/// use thinktank_client::{GenerateKeyRequest, ThinkTankClient};
///
/// # async fn example() -> thinktank_client::Result<()> {
/// let public = ThinkTankClient::builder().build_public()?;
/// let created = public.keys().generate(GenerateKeyRequest::new("Scout")).await?;
/// let key = created["api_key"].as_str().unwrap_or_default();
///
/// let client = ThinkTankClient::builder().api_key(key).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PublicClient {
    client: ThinkTankClient,
}

impl PublicClient {
    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        self.client.base_url()
    }

    /// Access the service status API.
    pub fn status(&self) -> StatusApi {
        self.client.status()
    }

    /// Access the API key API.
    pub fn keys(&self) -> KeysApi {
        self.client.keys()
    }
}

/// Builder for creating a [`ThinkTankClient`].
pub struct ClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    status_timeout: Duration,
    user_agent: Option<String>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("status_timeout", &self.status_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            status_timeout: DEFAULT_STATUS_TIMEOUT,
            user_agent: None,
        }
    }

    /// Create a builder pre-populated from a [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url,
            api_key: config.api_key,
            ..Self::new()
        }
    }

    /// Set the base URL for the service.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the timeout for authenticated requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout for the status check.
    pub fn status_timeout(mut self, timeout: Duration) -> Self {
        self.status_timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    ///
    /// Fails with [`Error::Config`] when no API key was supplied.
    pub fn build(mut self) -> Result<ThinkTankClient> {
        let api_key = self.api_key.take().filter(|k| !k.is_empty()).ok_or_else(|| {
            Error::Config(format!(
                "API key required. Set {} or pass an api_key",
                API_KEY_ENV
            ))
        })?;

        let mut api_key = HeaderValue::from_str(&api_key)
            .map_err(|_| Error::Config("Invalid API key".to_string()))?;
        api_key.set_sensitive(true);

        self.assemble(Some(api_key))
    }

    /// Build a client for the endpoints that work without an API key.
    ///
    /// Any configured key is ignored; requests never carry `x-api-key`.
    pub fn build_public(self) -> Result<PublicClient> {
        Ok(PublicClient {
            client: self.assemble(None)?,
        })
    }

    fn assemble(self, api_key: Option<HeaderValue>) -> Result<ThinkTankClient> {
        // Parse and normalize base URL
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        // Build default headers
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Build HTTP client
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("thinktank-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(ThinkTankClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                api_key,
                timeout: self.timeout,
                status_timeout: self.status_timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = ClientBuilder::new().build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_rejects_empty_api_key() {
        let result = ClientBuilder::new().api_key("").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_rejects_unprintable_api_key() {
        let result = ClientBuilder::new().api_key("bad\nkey").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = ClientBuilder::new()
            .api_key("key")
            .base_url("not a url")
            .build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_builder_uses_default_base_url() {
        let client = ClientBuilder::new().api_key("key").build().unwrap();
        assert_eq!(client.base_url().as_str(), "https://paparazzime.cloud/api/");
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let client = ClientBuilder::new()
            .api_key("key")
            .base_url("http://localhost:3003/api/")
            .build()
            .unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:3003/api/");
    }

    #[test]
    fn test_from_config() {
        let config = ClientConfig::new("key").with_base_url("http://example.test");
        let client = ThinkTankClient::from_config(config).unwrap();
        assert_eq!(client.base_url().as_str(), "http://example.test/");
    }

    #[test]
    fn test_url_building_keeps_base_path() {
        let client = ClientBuilder::new()
            .api_key("key")
            .base_url("https://paparazzime.cloud/api")
            .build()
            .unwrap();

        let url = client.url("/agents").unwrap();
        assert_eq!(url.as_str(), "https://paparazzime.cloud/api/agents");

        let url = client.url("collaboration/v2/task/t-1/claim").unwrap();
        assert_eq!(
            url.as_str(),
            "https://paparazzime.cloud/api/collaboration/v2/task/t-1/claim"
        );
    }

    #[test]
    fn test_build_public_needs_no_key() {
        let public = ClientBuilder::new()
            .base_url("http://localhost:3003/api")
            .build_public()
            .unwrap();
        assert_eq!(public.base_url().as_str(), "http://localhost:3003/api/");
        assert!(public.client.inner.api_key.is_none());
    }

    #[test]
    fn test_build_public_ignores_configured_key() {
        let public = ClientBuilder::new().api_key("key").build_public().unwrap();
        assert!(public.client.inner.api_key.is_none());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let builder = ClientBuilder::new().api_key("super-secret");
        assert!(!format!("{:?}", builder).contains("super-secret"));

        let client = builder.build().unwrap();
        assert!(!format!("{:?}", client).contains("super-secret"));
    }
}
