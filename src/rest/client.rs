//! Ainfinit REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::Form;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::{CredentialsProvider, SystemClock, TimestampProvider};
use crate::error::{AinfinitError, ApiError};
use crate::rest::advertisement::AdvertisementClient;
use crate::rest::device::DeviceClient;
use crate::rest::endpoints::AINFINIT_BASE_URL;
use crate::rest::operation::OperationClient;
use crate::rest::product::ProductClient;
use crate::status::{StatusTable, is_success};
use crate::types::ResponseEnvelope;

/// An empty query string.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];

/// The Ainfinit open platform REST client.
///
/// The client signs every request with a fresh `Authorization` token and
/// checks the response envelope before decoding the payload. Endpoints are
/// grouped by resource:
///
/// - [`AinfinitClient::devices`] for vending machine management
/// - [`AinfinitClient::products`] for the product catalog
/// - [`AinfinitClient::advertisements`] for advertisements and materials
/// - [`AinfinitClient::operations`] for doors, orders and replenishment
///
/// Cloning is cheap; clones share the connection pool and credentials.
///
/// # Example
///
/// ```rust,no_run
/// use ainfinit_api_client::auth::StaticCredentials;
/// use ainfinit_api_client::rest::{AinfinitClient, DeviceApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AinfinitClient::new(StaticCredentials::new("merchant", "4UafmbIJroNY2lXX"))?;
///
///     let info = client.devices().machine_info("VM0001").await?;
///     println!("Machine: {:?}", info);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AinfinitClient {
    http_client: ClientWithMiddleware,
    // Multipart bodies cannot be cloned, so uploads never go through the retry layer.
    upload_client: ClientWithMiddleware,
    base_url: String,
    credentials: Arc<dyn CredentialsProvider>,
    clock: Arc<dyn TimestampProvider>,
}

impl AinfinitClient {
    /// Create a new client with default settings.
    pub fn new(credentials: impl CredentialsProvider + 'static) -> Result<Self, AinfinitError> {
        Self::builder(credentials).build()
    }

    /// Create a new client builder.
    pub fn builder(credentials: impl CredentialsProvider + 'static) -> AinfinitClientBuilder {
        AinfinitClientBuilder::new(Arc::new(credentials))
    }

    /// The base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The merchant code requests are signed for.
    pub fn merchant_code(&self) -> &str {
        &self.credentials.get_credentials().merchant_code
    }

    /// Generate the `Authorization` token for an explicit timestamp.
    pub fn signature(&self, timestamp_ms: i64) -> Result<String, AinfinitError> {
        self.credentials.get_credentials().signature(timestamp_ms)
    }

    /// Vending machine management endpoints.
    pub fn devices(&self) -> DeviceClient {
        DeviceClient::new(self.clone())
    }

    /// Product catalog and product application endpoints.
    pub fn products(&self) -> ProductClient {
        ProductClient::new(self.clone())
    }

    /// Advertisement and source material endpoints.
    pub fn advertisements(&self) -> AdvertisementClient {
        AdvertisementClient::new(self.clone())
    }

    /// Door, order and replenishment endpoints.
    pub fn operations(&self) -> OperationClient {
        OperationClient::new(self.clone())
    }

    /// Make a signed GET request.
    pub(crate) async fn get<S, T, Q>(&self, endpoint: &str, query: &Q) -> Result<T, AinfinitError>
    where
        S: StatusTable,
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send_empty::<S, T, Q>(Method::GET, endpoint, query).await
    }

    /// Make a signed request without a body.
    pub(crate) async fn send_empty<S, T, Q>(
        &self,
        method: Method,
        endpoint: &str,
        query: &Q,
    ) -> Result<T, AinfinitError>
    where
        S: StatusTable,
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(endpoint, query)?;
        debug!(%method, endpoint, "Sending request");
        let request = self.authorize(self.http_client.request(method, &url))?;
        let response = request.send().await?;
        self.parse_response::<S, T>(endpoint, response).await
    }

    /// Make a signed request with a JSON body.
    pub(crate) async fn send_json<S, T, Q, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &Q,
        body: &B,
    ) -> Result<T, AinfinitError>
    where
        S: StatusTable,
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint, query)?;
        let body = serde_json::to_vec(body).map_err(|e| {
            AinfinitError::InvalidRequest(format!("Failed to encode request body: {e}"))
        })?;
        debug!(%method, endpoint, "Sending JSON request");
        let request = self
            .authorize(self.http_client.request(method, &url))?
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let response = request.send().await?;
        self.parse_response::<S, T>(endpoint, response).await
    }

    /// Make a signed `multipart/form-data` request.
    pub(crate) async fn send_multipart<S, T>(
        &self,
        method: Method,
        endpoint: &str,
        form: Form,
    ) -> Result<T, AinfinitError>
    where
        S: StatusTable,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint, NO_QUERY)?;
        debug!(%method, endpoint, "Sending multipart request");
        let request = self
            .authorize(self.upload_client.request(method, &url))?
            .multipart(form);
        let response = request.send().await?;
        self.parse_response::<S, T>(endpoint, response).await
    }

    fn url<Q>(&self, endpoint: &str, query: &Q) -> Result<String, AinfinitError>
    where
        Q: Serialize + ?Sized,
    {
        let query_string = serde_urlencoded::to_string(query)
            .map_err(|e| AinfinitError::InvalidRequest(e.to_string()))?;
        Ok(if query_string.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, query_string)
        })
    }

    /// Attach a token signed with the current timestamp.
    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, AinfinitError> {
        let timestamp = self.clock.now_millis();
        let token = self.signature(timestamp)?;
        Ok(builder.header(AUTHORIZATION, token))
    }

    /// Check the HTTP status and decode the body.
    async fn parse_response<S, T>(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, AinfinitError>
    where
        S: StatusTable,
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "HTTP request failed");
            return Err(AinfinitError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        decode_response::<S, T>(endpoint, &body)
    }
}

/// Decode a 2xx response body.
///
/// The `{status, message}` envelope is checked first; a status outside the
/// success range is resolved through the table `S`. An empty body decodes
/// as an empty object.
pub(crate) fn decode_response<S, T>(endpoint: &str, body: &str) -> Result<T, AinfinitError>
where
    S: StatusTable,
    T: DeserializeOwned,
{
    if body.trim().is_empty() {
        return Ok(serde_json::from_str("{}")?);
    }

    let envelope: ResponseEnvelope = serde_json::from_str(body).map_err(|e| {
        AinfinitError::InvalidResponse(format!("Failed to parse response: {e}. Body: {body}"))
    })?;

    if !is_success(envelope.status) {
        let error = ApiError::from_status::<S>(envelope.status, envelope.message);
        warn!(endpoint, code = error.code, error = %error, "Request rejected");
        return Err(AinfinitError::Api(error));
    }

    Ok(serde_json::from_str(body)?)
}

/// Append a path parameter to an endpoint.
///
/// The parameter must be a single non-empty path segment.
pub(crate) fn with_segment(endpoint: &str, segment: &str) -> Result<String, AinfinitError> {
    if segment.is_empty() || segment.contains(['/', '?', '#']) {
        return Err(AinfinitError::InvalidRequest(format!(
            "Invalid path parameter: {segment:?}"
        )));
    }
    Ok(format!("{endpoint}/{segment}"))
}

impl std::fmt::Debug for AinfinitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AinfinitClient")
            .field("base_url", &self.base_url)
            .field("merchant_code", &self.merchant_code())
            .finish()
    }
}

/// Builder for [`AinfinitClient`].
pub struct AinfinitClientBuilder {
    credentials: Arc<dyn CredentialsProvider>,
    base_url: String,
    clock: Option<Arc<dyn TimestampProvider>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    max_retries: u32,
}

impl AinfinitClientBuilder {
    /// Create a new builder with default settings.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            credentials,
            base_url: AINFINIT_BASE_URL.to_string(),
            clock: None,
            user_agent: None,
            timeout: None,
            max_retries: 0,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    ///
    /// An empty string selects the production URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom timestamp source.
    pub fn clock(mut self, clock: Arc<dyn TimestampProvider>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a timeout covering each whole request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries for transient failures.
    ///
    /// Defaults to 0. Multipart uploads are never retried.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<AinfinitClient, AinfinitError> {
        let base_url = normalize_base_url(&self.base_url)?;

        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("ainfinit-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("ainfinit-api-client"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build()?;

        let mut http_client =
            ClientBuilder::new(reqwest_client.clone()).with(TracingMiddleware::default());
        if self.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(self.max_retries);
            http_client = http_client.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        let upload_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));

        Ok(AinfinitClient {
            http_client: http_client.build(),
            upload_client,
            base_url,
            credentials: self.credentials,
            clock,
        })
    }
}

/// Trim and validate a base URL, falling back to production when empty.
fn normalize_base_url(url: &str) -> Result<String, AinfinitError> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(AINFINIT_BASE_URL.to_string());
    }
    let parsed = url::Url::parse(trimmed)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AinfinitError::InvalidRequest(format!(
            "Unsupported base URL scheme: {}",
            parsed.scheme()
        )));
    }
    Ok(trimmed.to_string())
}
