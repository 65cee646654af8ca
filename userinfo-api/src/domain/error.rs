use strum::Display;
use thiserror::Error;

pub const ERROR_KEYWORD_REQUIRED: &str = "Property \"keyword\" is required";
pub const ERROR_NON_EMPTY_ARRAY: &str = "A non-empty array of string is required";
pub const ERROR_LIMIT_REQUIRED: &str = "Property \"limit\" must be greater than zero";

/// The external system a failed call was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Backend {
    #[strum(serialize = "search")]
    Search,
    #[strum(serialize = "cache")]
    Cache,
    #[strum(serialize = "credential table")]
    CredentialTable,
}

/// Errors surfaced by the lookup, search and authentication operations.
#[derive(Debug, Error)]
pub enum UserInfoError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{backend} backend unavailable: {message}")]
    BackendUnavailable { backend: Backend, message: String },
    #[error("malformed {backend} record: {message}")]
    MalformedRecord { backend: Backend, message: String },
}

impl UserInfoError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn unavailable(backend: Backend, err: impl ToString) -> Self {
        Self::BackendUnavailable {
            backend,
            message: err.to_string(),
        }
    }

    pub fn malformed(backend: Backend, err: impl ToString) -> Self {
        Self::MalformedRecord {
            backend,
            message: err.to_string(),
        }
    }
}
