//! The AnkiConnect client and builder.

use std::time::Duration;

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::actions::{DeckActions, MiscActions, ModelActions, NoteActions};
use crate::error::{Error, Lenient, Result};
use crate::request::{AnkiRequest, AnkiResponse};

/// Default host for AnkiConnect.
pub const DEFAULT_HOST: &str = "localhost";

/// Default port for AnkiConnect.
pub const DEFAULT_PORT: u16 = 8765;

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The main client for interacting with AnkiConnect.
///
/// # Example
///
/// ```no_run
/// use deckcopy_connect::AnkiClient;
///
/// # async fn example() -> deckcopy_connect::Result<()> {
/// let client = AnkiClient::new();
///
/// let decks = client.decks().names().await?;
/// println!("{} decks", decks.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AnkiClient {
    http_client: Client,
    base_url: String,
}

impl AnkiClient {
    /// Create a new client with default settings.
    ///
    /// Connects to `http://localhost:8765` with a 30 second timeout.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for custom client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The endpoint requests are posted to.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Access deck operations.
    pub fn decks(&self) -> DeckActions<'_> {
        DeckActions { client: self }
    }

    /// Access miscellaneous operations.
    pub fn misc(&self) -> MiscActions<'_> {
        MiscActions { client: self }
    }

    /// Access note operations.
    pub fn notes(&self) -> NoteActions<'_> {
        NoteActions { client: self }
    }

    /// Access model (note type) operations.
    pub fn models(&self) -> ModelActions<'_> {
        ModelActions { client: self }
    }

    /// Call any action and get its raw `result` back.
    ///
    /// Never fails: a transport failure, an `error` in the response, or a
    /// missing/null `result` is logged and reported as `None`. On success the
    /// `result` value is returned exactly as AnkiConnect sent it.
    ///
    /// Null or empty-object params are left out of the envelope.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use deckcopy_connect::AnkiClient;
    /// # async fn example() {
    /// let client = AnkiClient::new();
    /// let params = serde_json::json!({"query": "deck:\"NEW-JLPT\""});
    /// if let Some(ids) = client.invoke("findNotes", Some(params)).await {
    ///     println!("found {}", ids);
    /// }
    /// # }
    /// ```
    pub async fn invoke(
        &self,
        action: &str,
        params: Option<serde_json::Value>,
    ) -> Option<serde_json::Value> {
        let params =
            params.filter(|p| !(p.is_null() || p.as_object().is_some_and(|o| o.is_empty())));
        let request = AnkiRequest::with_optional_params(action, params);
        self.send_request::<_, serde_json::Value>(&request)
            .await
            .lenient(action)
    }

    /// Execute an action without parameters.
    pub(crate) async fn request_without_params<R>(&self, action: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let request = AnkiRequest::<()>::without_params(action);
        self.send_request(&request).await
    }

    /// Execute an action with parameters.
    pub(crate) async fn request<P, R>(&self, action: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = AnkiRequest::new(action, params);
        self.send_request(&request).await
    }

    /// Execute an action where a null result is a valid answer.
    pub(crate) async fn request_nullable<P, R>(&self, action: &str, params: P) -> Result<Option<R>>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = AnkiRequest::new(action, params);
        let mut response = self.post::<P, R>(&request).await?;

        match (response.error_message(), response.result) {
            (Some(err), _) => Err(Error::AnkiConnect(err)),
            (None, result) => Ok(result),
        }
    }

    /// Send a request to AnkiConnect and require a result.
    async fn send_request<T, R>(&self, request: &AnkiRequest<'_, T>) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let mut response = self.post::<T, R>(request).await?;

        match (response.error_message(), response.result) {
            (Some(err), _) => Err(Error::AnkiConnect(err)),
            (None, Some(result)) => Ok(result),
            (None, None) => Err(Error::EmptyResponse),
        }
    }

    /// POST the envelope and decode the response envelope.
    async fn post<T, R>(&self, request: &AnkiRequest<'_, T>) -> Result<AnkiResponse<R>>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        debug!(action = request.action, url = %self.base_url, "Sending AnkiConnect request");

        let response = self
            .http_client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    Error::ConnectionRefused
                } else {
                    Error::Http(e)
                }
            })?
            .error_for_status()?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Default for AnkiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating a customized [`AnkiClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use deckcopy_connect::AnkiClient;
///
/// let client = AnkiClient::builder()
///     .endpoint("localhost", 8765)
///     .timeout(Duration::from_secs(60))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: endpoint_url(DEFAULT_HOST, DEFAULT_PORT),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the full AnkiConnect URL.
    ///
    /// Defaults to `http://localhost:8765`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the AnkiConnect host and port.
    pub fn endpoint(mut self, host: &str, port: u16) -> Self {
        self.base_url = endpoint_url(host, port);
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the client, reporting HTTP client construction failures.
    pub fn try_build(self) -> Result<AnkiClient> {
        if self.base_url.is_empty() {
            return Err(Error::Config("AnkiConnect URL must not be empty".into()));
        }

        let http_client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(AnkiClient {
            http_client,
            base_url: self.base_url,
        })
    }

    /// Build the client.
    ///
    /// # Panics
    ///
    /// Panics if the URL is empty or the HTTP client cannot be constructed
    /// (e.g. no TLS backend). Use [`try_build`](Self::try_build) to handle that.
    pub fn build(self) -> AnkiClient {
        self.try_build().expect("Failed to build HTTP client")
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn endpoint_url(host: &str, port: u16) -> String {
    format!("http://{}:{}/", host, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint() {
        let client = AnkiClient::new();
        assert_eq!(client.url(), "http://localhost:8765/");
    }

    #[test]
    fn custom_endpoint() {
        let client = AnkiClient::builder().endpoint("127.0.0.1", 9000).build();
        assert_eq!(client.url(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn empty_url_is_rejected() {
        let result = AnkiClient::builder().url("").try_build();
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
