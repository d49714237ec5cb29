//! HTTP client wrapper for the hosted backend.

use std::fmt;
use std::time::Duration;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};
use crate::retry::{execute_empty_with_retry, execute_with_retry, RetryConfig};
#[cfg(test)]
use crate::retry::{DEFAULT_INITIAL_BACKOFF_SECS, DEFAULT_MAX_BACKOFF_SECS, DEFAULT_MAX_RETRIES};

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path prefix of the table (PostgREST) API.
pub(crate) const REST_PATH: &str = "/rest/v1";

/// Path prefix of the identity provider API.
pub(crate) const AUTH_PATH: &str = "/auth/v1";

/// Client for the SP Events backend.
///
/// Every request carries the project's public API key. Data requests run as
/// the signed-in user when an access token is set, otherwise as the anonymous
/// role.
#[derive(Clone)]
pub struct EventsClient {
    base_url: String,
    api_key: String,
    access_token: Option<String>,
    http_client: reqwest::Client,
    retry_config: RetryConfig,
}

impl EventsClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or key is unusable or the HTTP client
    /// cannot be constructed.
    pub fn new(project_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        EventsClientBuilder::new(project_url, api_key).build()
    }

    /// Returns a copy of this client that authenticates with `access_token`.
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..self.clone()
        }
    }

    /// Returns the project base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the project API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the access token, if the client is authenticated.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns a reference to the underlying HTTP client.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Returns the maximum number of retry attempts.
    pub fn max_retries(&self) -> u32 {
        self.retry_config.max_retries
    }

    /// Returns the initial backoff duration.
    pub fn initial_backoff(&self) -> Duration {
        self.retry_config.initial_backoff
    }

    /// Returns the maximum backoff duration.
    pub fn max_backoff(&self) -> Duration {
        self.retry_config.max_backoff
    }

    #[cfg(test)]
    pub(crate) fn calculate_backoff(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        self.retry_config.calculate_backoff(attempt, retry_after)
    }

    /// Builds a full URL from a path and query parameters.
    pub(crate) fn url<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<String> {
        let query = serde_urlencoded::to_string(query)?;
        if query.is_empty() {
            Ok(format!("{}{}", self.base_url, path))
        } else {
            Ok(format!("{}{}?{}", self.base_url, path, query))
        }
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        self.http_client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    /// Performs a GET request.
    ///
    /// # Arguments
    /// * `path` - Path below the project URL (e.g. "/rest/v1/events")
    /// * `query` - Query parameters, serialized with `serde_urlencoded`
    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path, query)?;
        tracing::debug!(%url, "GET");

        let url = &url;
        execute_with_retry(&self.retry_config, move || async move {
            self.request(Method::GET, url)
                .send()
                .await
                .map_err(Error::from)
        })
        .await
    }

    /// Performs a POST request with a JSON body and decodes the JSON response.
    pub async fn post<T, Q, B>(&self, path: &str, query: &Q, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = self.url(path, query)?;
        tracing::debug!(%url, "POST");

        let url = &url;
        execute_with_retry(&self.retry_config, move || async move {
            self.request(Method::POST, url)
                .json(body)
                .send()
                .await
                .map_err(Error::from)
        })
        .await
    }

    /// Performs a POST request whose response body is ignored.
    ///
    /// Inserts into tables use this with `Prefer: return=minimal`, which makes
    /// the backend answer `201 Created` with no body.
    pub async fn post_no_content<Q, B>(&self, path: &str, query: &Q, body: &B) -> Result<()>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = self.url(path, query)?;
        tracing::debug!(%url, "POST");

        let url = &url;
        execute_empty_with_retry(&self.retry_config, move || async move {
            self.request(Method::POST, url)
                .header("Prefer", "return=minimal")
                .json(body)
                .send()
                .await
                .map_err(Error::from)
        })
        .await
    }

    /// Performs a DELETE request.
    ///
    /// # Returns
    /// Ok(()) on success (the backend answers 204 No Content).
    pub async fn delete<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<()> {
        let url = self.url(path, query)?;
        tracing::debug!(%url, "DELETE");

        let url = &url;
        execute_empty_with_retry(&self.retry_config, move || async move {
            self.request(Method::DELETE, url)
                .send()
                .await
                .map_err(Error::from)
        })
        .await
    }
}

impl fmt::Debug for EventsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("retry_config", &self.retry_config)
            .finish()
    }
}

/// Builder for [`EventsClient`].
#[derive(Clone)]
pub struct EventsClientBuilder {
    project_url: String,
    api_key: String,
    access_token: Option<String>,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl EventsClientBuilder {
    /// Starts a builder for the given project URL and public API key.
    pub fn new(project_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_url: project_url.into(),
            api_key: api_key.into(),
            access_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_config: RetryConfig::default(),
        }
    }

    /// Authenticates requests with a user access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum number of retries on HTTP 429.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.retry_config.max_retries = max_retries;
        self
    }

    /// Sets the initial backoff duration.
    pub fn initial_backoff(mut self, backoff: Duration) -> Self {
        self.retry_config.initial_backoff = backoff;
        self
    }

    /// Sets the maximum backoff duration.
    pub fn max_backoff(mut self, backoff: Duration) -> Self {
        self.retry_config.max_backoff = backoff;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the project URL is not an http(s)
    /// URL or the API key is empty.
    pub fn build(self) -> Result<EventsClient> {
        let base_url = self.project_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(Error::InvalidConfig(format!(
                "project URL must start with http:// or https://, got '{}'",
                self.project_url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(Error::InvalidConfig("API key is empty".to_string()));
        }

        let http_client = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(EventsClient {
            base_url,
            api_key: self.api_key.trim().to_string(),
            access_token: self.access_token,
            http_client,
            retry_config: self.retry_config,
        })
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
