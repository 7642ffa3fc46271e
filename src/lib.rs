//! # Bitfinex Client
//!
//! An async Rust client library for the Bitfinex v1 REST API.
//!
//! ## Features
//!
//! - Public market data (ticker)
//! - Authenticated account and trading endpoints signed with HMAC-SHA384
//! - Strictly increasing, thread-safe nonces
//! - Exchange errors reported inside `200 OK` bodies surfaced as typed errors
//! - Optional proxy and timeout per client
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitfinex_api_client::rest::PublicClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PublicClient::new();
//!     let ticker = client.get_ticker("btcusd").await?;
//!     println!("Ticker: {:?}", ticker);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;

// Re-export commonly used types at crate root
pub use error::{ApiError, BitfinexError};
pub use rest::{PublicClient, TradingClient};

/// Result type alias using BitfinexError
pub type Result<T> = std::result::Result<T, BitfinexError>;
