//! # Response envelopes
//!
//! The API wraps some payloads as `{ "data": T, ... }` and returns others bare.
//! Every response body goes through [`decode_body`], so the ambiguity is
//! resolved in exactly one place:
//!
//! 1. An empty body is treated as JSON `null`.
//! 2. If the body is a JSON object with a `data` member that is not `null`,
//!    that member is the payload.
//! 3. Otherwise the whole body is the payload.
//!
//! Sibling members of `data` (`success`, `message`, pagination `meta`) are
//! discarded.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Returns the payload part of a response value according to the module rules.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            if map.get("data").is_some_and(|data| !data.is_null()) {
                map.remove("data").unwrap_or(Value::Null)
            } else {
                Value::Object(map)
            }
        }
        other => other,
    }
}

/// Decodes an already-parsed response value.
pub fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(unwrap_envelope(value))
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Decodes a raw response body.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?
    };
    decode(value)
}
