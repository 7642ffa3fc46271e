//! Authentication module for the Bitfinex API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - HMAC-SHA384 payload signing for authenticated requests

mod credentials;
mod nonce;
mod signature;

pub use credentials::{
    API_KEY_ENV, API_SECRET_ENV, Credentials, CredentialsProvider, EnvCredentials,
    StaticCredentials,
};
pub use nonce::{IncreasingNonce, NonceProvider};
pub use signature::{
    API_KEY_HEADER, PAYLOAD_HEADER, RequestSigner, SIGNATURE_HEADER, SignedRequest,
    build_envelope, sign_payload, sign_request,
};
