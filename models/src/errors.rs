// models/src/errors.rs
use std::io;
pub use thiserror::Error;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;

/// Error taxonomy for the access client. Transport and server failures are
/// carried as strings so the error type stays `Clone` + serializable.
#[derive(Debug, Serialize, Deserialize, Error, Clone, PartialEq)]
pub enum AccessError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx response. `detail` is the server's own message, surfaced verbatim.
    #[error("{detail}")]
    Api { status: u16, detail: String },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("Validation error: {0}")]
    Validation(ValidationError),
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("session expired at {0}")]
    SessionExpired(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("cannot {action} while {state}")]
    InvalidTransition { state: String, action: String },
    #[error("Audit error: {0}")]
    Audit(String),
    #[error("An unknown error occurred.")]
    Unknown,
}

impl From<&str> for AccessError {
    fn from(error: &str) -> Self {
        AccessError::Config(error.to_string())
    }
}

impl AccessError {
    /// True when retyping the same input cannot help (auth is gone).
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            AccessError::NotAuthenticated | AccessError::SessionExpired(_)
        ) || matches!(self, AccessError::Api { status: 401, .. })
    }
}

impl From<io::Error> for AccessError {
    fn from(err: io::Error) -> Self {
        AccessError::Io(format!("IO error: {}", err))
    }
}

impl From<SerdeJsonError> for AccessError {
    fn from(err: SerdeJsonError) -> Self {
        AccessError::Serialization(format!("JSON serialization error: {}", err))
    }
}

impl From<reqwest::Error> for AccessError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AccessError::Deserialization(format!("Response decode error: {}", err))
        } else {
            AccessError::Network(format!("HTTP transport error: {}", err))
        }
    }
}

impl From<ValidationError> for AccessError {
    fn from(err: ValidationError) -> Self {
        AccessError::Validation(err)
    }
}

/// Local input checks. These are UX hints; the backend remains the authority.
#[derive(Debug, Serialize, Deserialize, Error, PartialEq, Clone)]
pub enum ValidationError {
    #[error("patient id must not be empty")]
    EmptyPatientId,
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("password must not be empty")]
    MissingPassword,
    #[error("justification must be at least {min} characters, got {len}")]
    JustificationTooShort { min: usize, len: usize },
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    #[error("unknown purpose '{0}'")]
    UnknownPurpose(String),
    #[error("unknown data category '{0}'")]
    UnknownDataCategory(String),
    #[error("unknown emergency type '{0}'")]
    UnknownEmergencyType(String),
    #[error("purpose '{0}' is not selectable here")]
    PurposeNotSelectable(String),
    #[error("no purpose permits this access")]
    NoSelectablePurposes,
    #[error("a purpose must be selected before confirming")]
    NoPurposeSelected,
}

/// A type alias for a `Result` that returns an `AccessError` on failure.
pub type AccessResult<T> = Result<T, AccessError>;

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
