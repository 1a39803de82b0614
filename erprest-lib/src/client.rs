//! Main ErpRestClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::EntityClient;
use crate::api::GlSlipsClient;
use crate::api::SalesServicePricesClient;
use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;
use crate::error::ServiceErrorDetail;
use crate::query::FieldMapping;

/// The main client for interacting with the ERP REST service.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use erprest_lib::{ErpRestClient, auth::StaticTokenProvider};
///
/// let provider = StaticTokenProvider::new("my-token");
/// let client = ErpRestClient::builder()
///     .url("https://erp.example.com")
///     .token_provider(provider)
///     .build();
///
/// let slips = client.gl_slips().list(&Default::default()).await?;
/// ```
#[derive(Clone)]
pub struct ErpRestClient {
    inner: Arc<ErpRestClientInner>,
}

struct ErpRestClientInner {
    base_url: String,
    api_version: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ErpRestClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ErpRestClientBuilder<Missing, Missing> {
        ErpRestClientBuilder::new()
    }

    /// Returns the base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the API version being used.
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    /// Returns a generic entity client for an arbitrary endpoint.
    ///
    /// The typed accessors below cover the common entities; this is the
    /// escape hatch for everything else.
    pub fn entity(&self, endpoint: &'static str) -> EntityClient<'_> {
        EntityClient::new(self, endpoint, FieldMapping::new())
    }

    /// Returns the client for the `glSlips` entity collection.
    pub fn gl_slips(&self) -> GlSlipsClient<'_> {
        GlSlipsClient::new(self)
    }

    /// Returns the client for the `salesServicePrices` entity collection.
    pub fn sales_service_prices(&self) -> SalesServicePricesClient<'_> {
        SalesServicePricesClient::new(self)
    }

    /// Makes an HTTP request against a path below the API root.
    ///
    /// This is the low-level request primitive used by all entity methods.
    /// `path` is the finished `endpoint[/segment...][?querystring]` string
    /// produced by [`build_path`](crate::query::build_path); this method has
    /// no awareness of query semantics.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, Error> {
        let url = format!(
            "{}/api/{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            self.inner.api_version,
            path.trim_start_matches('/')
        );

        let token = self
            .inner
            .token_provider
            .get_token(&self.inner.base_url)
            .await?;

        tracing::debug!(%method, path, "sending request");

        let mut request = self
            .inner
            .http_client
            .request(method, &url)
            .headers(default_headers())
            .header(reqwest::header::AUTHORIZATION, token.as_bearer());

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status_code, "request failed");

        match ServiceErrorDetail::from_body(&body) {
            Some(detail) => {
                let message = detail.message.clone();
                Err(Error::Api(ApiError::http_with_detail(
                    status_code,
                    message,
                    detail,
                )))
            }
            None => Err(Error::Api(ApiError::http(status_code, body))),
        }
    }

    /// Makes a request and deserializes the JSON response body.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, Error> {
        let response = self.request(method, path, body).await?;
        let body = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), body)))
    }

    /// Makes a request and discards the response body.
    pub(crate) async fn request_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(), Error> {
        self.request(method, path, body).await?;
        Ok(())
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    headers.insert("Accept", HeaderValue::from_static("application/json"));
    headers
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ErpRestClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The service base URL
/// - `token_provider` - A [`TokenProvider`] implementation
///
/// # Example
///
/// ```ignore
/// let client = ErpRestClient::builder()
///     .url("https://erp.example.com")
///     .token_provider(my_provider)
///     .api_version("v1")
///     .timeout(Duration::from_secs(30))
///     .build();
/// ```
pub struct ErpRestClientBuilder<Url, Provider> {
    url: Url,
    token_provider: Provider,
    api_version: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ErpRestClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            api_version: "v1".to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for ErpRestClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ErpRestClientBuilder<Missing, P> {
    /// Sets the service base URL.
    ///
    /// # Example
    ///
    /// ```ignore
    /// .url("https://erp.example.com")
    /// ```
    pub fn url(self, url: impl Into<String>) -> ErpRestClientBuilder<Set<String>, P> {
        ErpRestClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            api_version: self.api_version,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> ErpRestClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> ErpRestClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        ErpRestClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            api_version: self.api_version,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> ErpRestClientBuilder<U, P> {
    /// Sets the API version to use.
    ///
    /// Defaults to `v1`.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ErpRestClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`ErpRestClient`].
    ///
    /// This method is only available when both `url` and `token_provider`
    /// have been set.
    pub fn build(self) -> ErpRestClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().expect("Failed to build HTTP client")
        });

        ErpRestClient {
            inner: Arc::new(ErpRestClientInner {
                base_url: self.url.0,
                api_version: self.api_version,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        }
    }
}
