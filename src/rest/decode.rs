//! Response decoding.
//!
//! Bitfinex can report a failure inside a `200 OK` body, so every body that
//! parses as a JSON object is checked for an `error` field before it is
//! handed back, whatever the caller asked for.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, BitfinexError};

/// A successfully decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The parsed JSON value.
    Json(Value),
    /// The body text, untouched.
    Raw(String),
}

impl Decoded {
    /// The JSON value, if this is [`Decoded::Json`].
    pub fn into_json(self) -> Option<Value> {
        match self {
            Decoded::Json(value) => Some(value),
            Decoded::Raw(_) => None,
        }
    }
}

/// Decode a response body.
///
/// * `want_json` - when `true` the body must be JSON and is returned parsed;
///   when `false` the body text is returned as-is (after the error check).
pub fn decode(body: &str, want_json: bool) -> Result<Decoded, BitfinexError> {
    if !want_json {
        return decode_raw(body).map(Decoded::Raw);
    }

    let value = serde_json::from_str::<Value>(body).map_err(|_| {
        BitfinexError::MalformedResponse {
            body: body.to_string(),
        }
    })?;
    check_exchange_error(&value)?;
    Ok(Decoded::Json(value))
}

/// Decode a response body into `T`.
pub fn decode_json<T>(body: &str) -> Result<T, BitfinexError>
where
    T: DeserializeOwned,
{
    match decode(body, true)? {
        Decoded::Json(value) => Ok(serde_json::from_value(value)?),
        Decoded::Raw(text) => Err(BitfinexError::MalformedResponse { body: text }),
    }
}

/// Return the body text untouched, unless it is JSON carrying an exchange
/// error.
pub fn decode_raw(body: &str) -> Result<String, BitfinexError> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        check_exchange_error(&value)?;
    }
    Ok(body.to_string())
}

fn check_exchange_error(value: &Value) -> Result<(), BitfinexError> {
    match exchange_error(value) {
        Some(api_error) => {
            tracing::warn!(error = %api_error, "Bitfinex returned an error");
            Err(BitfinexError::Api(api_error))
        }
        None => Ok(()),
    }
}

/// Extract the exchange error from a top-level `error` field, if it is set.
fn exchange_error(value: &Value) -> Option<ApiError> {
    let error = value.as_object()?.get("error")?;
    let set = match error {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    };
    if !set {
        return None;
    }

    let message = match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some(ApiError::new(message))
}
