//! Error types for the Bitfinex client library.

use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for all Bitfinex client operations.
#[derive(Error, Debug)]
pub enum BitfinexError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The server answered with a non-success HTTP status
    #[error("HTTP status {status}: {body}")]
    Status {
        /// Status code returned by the server
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// The response was expected to be JSON but could not be parsed
    #[error("Could not decode json for: {body}")]
    MalformedResponse {
        /// Raw response body
        body: String,
    },

    /// Bitfinex API returned an error
    #[error("Bitfinex API error: {0}")]
    Api(ApiError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Request parameters cannot be turned into a signed envelope
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BitfinexError {
    /// Whether the failure happened at the transport level (network or HTTP status).
    ///
    /// Transport failures never reach the response decoder.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::HttpMiddleware(_) | Self::Status { .. }
        )
    }

    /// The exchange error, if this is an exchange-logical failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// An error reported by Bitfinex inside a response body.
///
/// The message is kept exactly as the exchange sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The error string from the `error` field
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl ApiError {
    /// Create a new API error from the exchange message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.message
            .to_ascii_lowercase()
            .contains(&needle.to_ascii_lowercase())
    }

    /// Check if this is an invalid nonce error.
    ///
    /// Retrying with a fresh nonce is usually enough to recover.
    pub fn is_invalid_nonce(&self) -> bool {
        self.contains(error_messages::INVALID_NONCE)
            || self.contains(error_messages::NONCE_TOO_SMALL)
    }

    /// Check if this is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.contains(error_messages::INVALID_KEY)
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.contains(error_messages::INVALID_SIGNATURE)
    }

    /// Check if this is an insufficient funds error.
    pub fn is_insufficient_funds(&self) -> bool {
        self.contains(error_messages::INSUFFICIENT_FUNDS)
    }

    /// Check if this is an unknown symbol error.
    pub fn is_unknown_pair(&self) -> bool {
        self.contains(error_messages::UNKNOWN_SYMBOL)
    }
}

/// Known Bitfinex error messages for pattern matching.
pub mod error_messages {
    pub const INVALID_NONCE: &str = "Invalid nonce";
    pub const NONCE_TOO_SMALL: &str = "Nonce is too small";
    pub const INVALID_KEY: &str = "Could not find a key matching the given X-BFX-APIKEY";
    pub const INVALID_SIGNATURE: &str = "Invalid X-BFX-SIGNATURE";
    pub const INSUFFICIENT_FUNDS: &str = "Invalid order: not enough exchange balance";
    pub const UNKNOWN_SYMBOL: &str = "Unknown symbol";
}
