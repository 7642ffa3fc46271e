//! HMAC-SHA384 request signing for Bitfinex API authentication.
//!
//! Authenticated v1 endpoints expect the request parameters wrapped in an
//! envelope together with the endpoint path and a nonce:
//!
//! ```text
//! envelope  = JSON({ "nonce": "<nonce>", "request": "<path>", ...params })
//! payload   = base64(envelope)
//! signature = hex(HMAC-SHA384(payload, api_secret))
//! body      = form-urlencoded(nonce, request, ...params)
//! ```
//!
//! The API key, payload and signature travel in the `X-BFX-APIKEY`,
//! `X-BFX-PAYLOAD` and `X-BFX-SIGNATURE` headers.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::Sha384;

use crate::auth::{Credentials, CredentialsProvider, NonceProvider};
use crate::error::BitfinexError;

type HmacSha384 = Hmac<Sha384>;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-BFX-APIKEY";
/// Header carrying the base64 payload.
pub const PAYLOAD_HEADER: &str = "X-BFX-PAYLOAD";
/// Header carrying the hex signature.
pub const SIGNATURE_HEADER: &str = "X-BFX-SIGNATURE";

/// The authentication material for a single request.
///
/// Built fresh for every call and never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// The API key, sent verbatim.
    pub api_key: String,
    /// The nonce embedded in the envelope.
    pub nonce: u64,
    /// Base64 encoding of [`SignedRequest::envelope`].
    pub payload: String,
    /// Lowercase hex HMAC-SHA384 of the payload.
    pub signature: String,
    /// The serialized JSON envelope.
    pub envelope: String,
    /// The same fields, form-urlencoded, for the request body.
    pub form: String,
}

impl SignedRequest {
    /// The header triple to attach to the request.
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            (API_KEY_HEADER, self.api_key.as_str()),
            (PAYLOAD_HEADER, self.payload.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
        ]
    }
}

impl std::fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequest")
            .field("api_key", &self.api_key)
            .field("nonce", &self.nonce)
            .field("payload", &"[REDACTED]")
            .field("signature", &"[REDACTED]")
            .finish()
    }
}

/// Build the JSON envelope for a request.
///
/// `nonce` and `request` always override caller fields of the same name.
/// Keys are emitted in sorted order, so equal inputs give equal bytes.
pub fn build_envelope<P>(
    request_path: &str,
    nonce: u64,
    params: &P,
) -> Result<String, BitfinexError>
where
    P: Serialize + ?Sized,
{
    let fields = with_auth_fields(envelope_fields(params)?, request_path, nonce);
    Ok(serde_json::to_string(&fields)?)
}

fn envelope_fields<P>(params: &P) -> Result<Map<String, Value>, BitfinexError>
where
    P: Serialize + ?Sized,
{
    match serde_json::to_value(params)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(BitfinexError::InvalidRequest(format!(
            "request parameters must serialize to a JSON object, got {other}"
        ))),
    }
}

fn with_auth_fields(
    mut fields: Map<String, Value>,
    request_path: &str,
    nonce: u64,
) -> Map<String, Value> {
    fields.insert("nonce".to_string(), Value::String(nonce.to_string()));
    fields.insert("request".to_string(), Value::String(request_path.to_string()));
    fields
}

fn sign_fields(
    credentials: &Credentials,
    request_path: &str,
    nonce: u64,
    fields: Map<String, Value>,
) -> Result<SignedRequest, BitfinexError> {
    let fields = with_auth_fields(fields, request_path, nonce);
    let envelope = serde_json::to_string(&fields)?;
    let form = serde_urlencoded::to_string(&fields).map_err(|e| {
        BitfinexError::InvalidRequest(format!("request parameters must be flat: {e}"))
    })?;
    let payload = BASE64.encode(envelope.as_bytes());
    let signature = sign_payload(credentials.secret_bytes(), &payload)?;

    Ok(SignedRequest {
        api_key: credentials.api_key.clone(),
        nonce,
        payload,
        signature,
        envelope,
        form,
    })
}

/// Compute the lowercase hex HMAC-SHA384 of `payload` keyed with `secret`.
pub fn sign_payload(secret: &[u8], payload: &str) -> Result<String, BitfinexError> {
    let mut mac = HmacSha384::new_from_slice(secret)
        .map_err(|e| BitfinexError::InvalidRequest(format!("Invalid HMAC key: {e}")))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Sign a request for Bitfinex's authenticated v1 API with an explicit nonce.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `request_path` - The API endpoint path (e.g., "/v1/account_infos")
/// * `nonce` - The nonce value for this request
/// * `params` - Endpoint parameters, serialized as a JSON object
///
/// # Example
///
/// ```rust
/// use bitfinex_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "api_secret");
/// let signed = sign_request(&credentials, "/v1/account_infos", 1_700_000_000, &())?;
/// assert_eq!(signed.signature.len(), 96);
/// # Ok(())
/// # }
/// ```
pub fn sign_request<P>(
    credentials: &Credentials,
    request_path: &str,
    nonce: u64,
    params: &P,
) -> Result<SignedRequest, BitfinexError>
where
    P: Serialize + ?Sized,
{
    sign_fields(credentials, request_path, nonce, envelope_fields(params)?)
}

/// Signs requests with nonces drawn from a [`NonceProvider`].
#[derive(Clone)]
pub struct RequestSigner {
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl RequestSigner {
    /// Create a signer from a credentials provider and a nonce provider.
    pub fn new(
        credentials: Arc<dyn CredentialsProvider>,
        nonce_provider: Arc<dyn NonceProvider>,
    ) -> Self {
        Self {
            credentials,
            nonce_provider,
        }
    }

    /// The API key used for signing.
    pub fn api_key(&self) -> &str {
        &self.credentials.get_credentials().api_key
    }

    /// Sign a request for `request_path` using the next nonce.
    ///
    /// Parameters are validated before a nonce is taken, so a rejected request
    /// does not burn one.
    pub fn sign<P>(&self, request_path: &str, params: &P) -> Result<SignedRequest, BitfinexError>
    where
        P: Serialize + ?Sized,
    {
        let fields = envelope_fields(params)?;
        let nonce = self.nonce_provider.next_nonce();
        sign_fields(self.credentials.get_credentials(), request_path, nonce, fields)
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_key", &self.api_key())
            .finish()
    }
}
