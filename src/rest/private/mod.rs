//! Private REST API endpoints (authentication required).
//!
//! [`TradingClient`] wraps a [`PublicClient`] together with the credentials
//! and nonce source used to sign every request.

mod types;

pub use types::*;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::{CredentialsProvider, IncreasingNonce, NonceProvider, RequestSigner};
use crate::error::BitfinexError;
use crate::rest::PublicClient;
use crate::rest::decode::{decode_json, decode_raw};
use crate::rest::endpoints::private;

/// The Bitfinex REST API client for authenticated endpoints.
///
/// Nonces come from a single [`NonceProvider`] owned by the client (and its
/// clones), so concurrent calls through one client never reuse a nonce.
/// Separate clients sharing an API key do not coordinate; give each API key a
/// single client.
///
/// # Example
///
/// ```rust,no_run
/// use bitfinex_api_client::auth::StaticCredentials;
/// use bitfinex_api_client::rest::TradingClient;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = TradingClient::new(credentials);
///
///     for info in client.get_account_infos().await? {
///         for tier in info.fees {
///             println!("{}: maker {} taker {}", tier.pairs, tier.maker_fees, tier.taker_fees);
///         }
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct TradingClient {
    public: PublicClient,
    credentials: Arc<dyn CredentialsProvider>,
    signer: RequestSigner,
}

impl TradingClient {
    /// Create a trading client with a default [`PublicClient`].
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self::with_client(PublicClient::new(), credentials)
    }

    /// Create a trading client on top of a configured [`PublicClient`].
    pub fn with_client(public: PublicClient, credentials: Arc<dyn CredentialsProvider>) -> Self {
        let signer = RequestSigner::new(credentials.clone(), Arc::new(IncreasingNonce::new()));
        Self {
            public,
            credentials,
            signer,
        }
    }

    /// Replace the nonce provider.
    pub fn with_nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.signer = RequestSigner::new(self.credentials.clone(), provider);
        self
    }

    /// The underlying public client, for market data.
    pub fn public(&self) -> &PublicClient {
        &self.public
    }

    /// Sign `params` for `path`, POST them, and return the body text.
    async fn post<P>(&self, path: &str, params: &P) -> Result<String, BitfinexError>
    where
        P: Serialize + ?Sized,
    {
        let signed = self.signer.sign(path, params)?;
        tracing::debug!(path, nonce = signed.nonce, "sending signed request");
        self.public.post_signed(path, &signed).await
    }

    /// Make a signed POST request and decode the JSON body into `T`.
    pub async fn signed_post<T, P>(&self, path: &str, params: &P) -> Result<T, BitfinexError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let body = self.post(path, params).await?;
        decode_json(&body)
    }

    /// Make a signed POST request and return the body text.
    ///
    /// The body is still checked for an exchange error.
    pub async fn signed_post_raw<P>(
        &self,
        path: &str,
        params: &P,
    ) -> Result<String, BitfinexError>
    where
        P: Serialize + ?Sized,
    {
        let body = self.post(path, params).await?;
        decode_raw(&body)
    }

    /// Get the account fee schedule.
    pub async fn get_account_infos(&self) -> Result<Vec<AccountInfo>, BitfinexError> {
        self.signed_post(private::ACCOUNT_INFOS, &()).await
    }

    /// Get the transaction history.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitfinex_api_client::auth::EnvCredentials;
    /// use bitfinex_api_client::rest::TradingClient;
    /// use bitfinex_api_client::rest::private::UserTransactionsRequest;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = TradingClient::new(Arc::new(EnvCredentials::from_env()));
    ///
    ///     let request = UserTransactionsRequest::new(0, 10, true);
    ///     for tx in client.get_user_transactions(&request).await? {
    ///         println!("{} {} fee {}", tx.id, tx.datetime, tx.fee);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_user_transactions(
        &self,
        request: &UserTransactionsRequest,
    ) -> Result<Vec<Transaction>, BitfinexError> {
        self.signed_post(private::USER_TRANSACTIONS, request).await
    }

    /// Get open orders.
    pub async fn get_open_orders(&self) -> Result<Vec<OpenOrder>, BitfinexError> {
        self.signed_post(private::OPEN_ORDERS, &()).await
    }
}

impl std::fmt::Debug for TradingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingClient")
            .field("base_url", &self.public.base_url())
            .field("api_key", &self.signer.api_key())
            .finish()
    }
}
