//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use crate::error::BitfinexError;
use crate::rest::PublicClient;
use crate::rest::endpoints::public;

impl PublicClient {
    /// Get the ticker for a pair.
    ///
    /// # Arguments
    ///
    /// * `pair` - Pair symbol as Bitfinex spells it (e.g., "btcusd").
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
    ///     println!("bid {} / ask {}", ticker.bid, ticker.ask);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_ticker(&self, pair: &str) -> Result<Ticker, BitfinexError> {
        self.get(&public::ticker(pair)).await
    }
}
