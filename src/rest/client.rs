//! Bitfinex REST API transport and public client.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::SignedRequest;
use crate::error::BitfinexError;
use crate::rest::decode::{decode_json, decode_raw};
use crate::rest::endpoints::BITFINEX_BASE_URL;

/// The Bitfinex REST API client for public market data.
///
/// Holds no credentials. For authenticated endpoints wrap it in a
/// [`TradingClient`](crate::rest::TradingClient).
///
/// # Example
///
/// ```rust,no_run
/// use bitfinex_api_client::rest::PublicClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = PublicClient::new();
///     let ticker = client.get_ticker("btcusd").await?;
///     println!("Last price: {}", ticker.last_price);
///     Ok(())
/// }
/// ```
///
/// Routing every request through a proxy:
///
/// ```rust,no_run
/// use bitfinex_api_client::rest::PublicClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PublicClient::builder()
///     .proxy("http://127.0.0.1:8080")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PublicClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    user_agent: HeaderValue,
}

const DEFAULT_USER_AGENT: &str = concat!("bitfinex-api-client/", env!("CARGO_PKG_VERSION"));

impl PublicClient {
    /// Create a new client with default settings.
    ///
    /// Uses the production base URL, the default user agent, no proxy and no
    /// timeout. None of these can be invalid, so this cannot fail; use
    /// [`PublicClient::builder`] for anything configurable.
    pub fn new() -> Self {
        Self::from_parts(
            reqwest::Client::new(),
            BITFINEX_BASE_URL.to_string(),
            HeaderValue::from_static(DEFAULT_USER_AGENT),
        )
    }

    fn from_parts(
        reqwest_client: reqwest::Client,
        base_url: String,
        user_agent: HeaderValue,
    ) -> Self {
        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();
        Self {
            http_client,
            base_url,
            user_agent,
        }
    }

    /// Create a new client builder.
    pub fn builder() -> PublicClientBuilder {
        PublicClientBuilder::new()
    }

    /// The base URL every relative path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and decode the JSON body into `T`.
    pub async fn get<T>(&self, path: &str) -> Result<T, BitfinexError>
    where
        T: DeserializeOwned,
    {
        let body = self.send(self.http_client.get(self.url(path))).await?;
        decode_json(&body)
    }

    /// GET `path` and return the body text.
    ///
    /// The body is still checked for an exchange error.
    pub async fn get_raw(&self, path: &str) -> Result<String, BitfinexError> {
        let body = self.send(self.http_client.get(self.url(path))).await?;
        decode_raw(&body)
    }

    /// POST a signed envelope to `path` and return the body text.
    ///
    /// The envelope fields go in a form-urlencoded body; the auth triple is
    /// sent as headers.
    pub(crate) async fn post_signed(
        &self,
        path: &str,
        signed: &SignedRequest,
    ) -> Result<String, BitfinexError> {
        let mut request = self
            .http_client
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(signed.form.clone());
        for (name, value) in signed.headers() {
            request = request.header(name, value);
        }
        self.send(request).await
    }

    /// Send a request, failing on transport errors and non-success status.
    async fn send(&self, request: RequestBuilder) -> Result<String, BitfinexError> {
        let response = request
            .header(USER_AGENT, self.user_agent.clone())
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, "Bitfinex request failed");
            return Err(BitfinexError::Status { status, body });
        }

        Ok(body)
    }
}

impl Default for PublicClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PublicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicClient")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for [`PublicClient`].
pub struct PublicClientBuilder {
    base_url: String,
    user_agent: Option<String>,
    proxy: Option<String>,
    timeout: Option<Duration>,
}

impl PublicClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: BITFINEX_BASE_URL.to_string(),
            user_agent: None,
            proxy: None,
            timeout: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Route every request through the given proxy URL.
    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy = Some(proxy_url.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// Fails if the base URL or proxy URL is invalid.
    pub fn build(self) -> Result<PublicClient, BitfinexError> {
        let base_url = Url::parse(&self.base_url)?;
        let base_url = base_url.as_str().trim_end_matches('/').to_string();

        let user_agent = match &self.user_agent {
            Some(user_agent) => HeaderValue::from_str(user_agent)
                .map_err(|e| BitfinexError::Config(format!("invalid user agent: {e}")))?,
            None => HeaderValue::from_static(DEFAULT_USER_AGENT),
        };

        let mut builder = reqwest::Client::builder();
        if let Some(proxy_url) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy_url.as_str())
                .map_err(|e| BitfinexError::Config(format!("invalid proxy {proxy_url}: {e}")))?;
            builder = builder.proxy(proxy);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let reqwest_client = builder.build()?;

        Ok(PublicClient::from_parts(reqwest_client, base_url, user_agent))
    }
}

impl Default for PublicClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
