//! Error types for state, session and settings operations.

use carestay_api::ApiError;
use carestay_types::FieldError;
use thiserror::Error;

/// Errors reading or writing the persisted session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Filesystem error.
    #[error("session io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored session could not be encoded or decoded.
    #[error("session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or did not deserialize.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A value was read but is unusable.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Setting name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Errors surfaced by the application root and the auth store.
#[derive(Debug, Error)]
pub enum Error {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The persisted session could not be read or written.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Settings could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The payload failed client-side validation; nothing was sent.
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),
}

impl Error {
    /// Field errors, if this is a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Error::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for state operations.
pub type Result<T> = std::result::Result<T, Error>;
