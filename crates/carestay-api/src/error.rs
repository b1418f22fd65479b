//! # API Errors
//!
//! Error types for API operations.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during API operations.
///
/// Only transport and server failures are modelled here. Form validation is a
/// separate synchronous path (see `carestay_types::validation`).
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or HTTP transport error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-2xx status.
    #[error("server error: {status}{}", message_suffix(.message))]
    Server {
        /// HTTP status code.
        status: u16,
        /// Human-readable message extracted from the body, if any.
        message: Option<String>,
        /// Raw response body.
        body: String,
    },

    /// Failed to deserialize the response.
    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Builds a [`ApiError::Server`] from a status code and raw body.
    pub fn from_response(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = extract_message(&body);
        ApiError::Server {
            status,
            message,
            body,
        }
    }

    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidResponse(_) => None,
        }
    }

    /// Returns true for 401 responses.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Message suitable for showing to a user, if the server supplied one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" - {m}"))
        .unwrap_or_default()
}

/// Pulls a human-readable message out of an error body.
///
/// Looks at `message`, then `error`, then the first entry of `errors`, which
/// may be an array of strings or an object of field name to string arrays.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;

    let non_empty = |v: &Value| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(msg) = obj.get("message").and_then(non_empty) {
        return Some(msg);
    }
    if let Some(msg) = obj.get("error").and_then(non_empty) {
        return Some(msg);
    }
    match obj.get("errors")? {
        Value::Array(items) => items.iter().find_map(non_empty),
        Value::Object(fields) => fields.values().find_map(|v| match v {
            Value::Array(items) => items.iter().find_map(non_empty),
            other => non_empty(other),
        }),
        other => non_empty(other),
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
