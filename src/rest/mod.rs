//! Bitfinex v1 REST API clients.
//!
//! - [`PublicClient`] - market data, no credentials
//! - [`TradingClient`] - authenticated endpoints, built on a [`PublicClient`]
//!
//! ```rust,no_run
//! use bitfinex_api_client::auth::StaticCredentials;
//! use bitfinex_api_client::rest::{PublicClient, TradingClient};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), bitfinex_api_client::BitfinexError> {
//! let public = PublicClient::builder().proxy("http://127.0.0.1:3128").build()?;
//! let trading = TradingClient::with_client(
//!     public,
//!     Arc::new(StaticCredentials::new("api_key", "api_secret")),
//! );
//!
//! let ticker = trading.public().get_ticker("btcusd").await?;
//! let orders = trading.get_open_orders().await?;
//! println!("{} open orders at mid {}", orders.len(), ticker.mid);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod decode;
mod endpoints;
pub mod private;
pub mod public;

pub use client::{PublicClient, PublicClientBuilder};
pub use endpoints::*;
pub use private::TradingClient;
