// Client error types
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown to users when the backend could not be reached at all
pub const GENERIC_NETWORK_MESSAGE: &str = "Unable to reach the server. Please check your connection and try again.";

/// Shown when the backend reported a failure without a usable message
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong while processing your request.";

/// A failure reported by the backend (`success: false` or a non-2xx status)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFailure {
    pub status: u16,
    pub message: String,
}

impl ApiFailure {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (status {})", self.message, self.status)
    }
}

/// Client-side validation failures, raised before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("{0}")]
    Invalid(String),
}

/// Errors from the key/value stores backing token persistence
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Storage format error: {0}")]
    Format(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Format(err.to_string())
    }
}

/// Errors surfaced by the client data layer.
///
/// Cloneable so a single in-flight query result can be shared with every
/// caller waiting on the same cache key.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("{0}")]
    Api(ApiFailure),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("A request for '{0}' is already in progress")]
    AlreadyPending(String),

    #[error("Cached value for '{0}' has a different type")]
    CacheTypeMismatch(String),
}

impl ClientError {
    /// Message suitable for an inline banner or toast.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) | ClientError::Timeout(_) => GENERIC_NETWORK_MESSAGE.to_string(),
            ClientError::Api(failure) if !failure.message.trim().is_empty() => failure.message.clone(),
            ClientError::Validation(err) => err.to_string(),
            ClientError::AlreadyPending(_) => "Your request is already being processed.".to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            ClientError::Api(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<ApiFailure> for ClientError {
    fn from(failure: ApiFailure) -> Self {
        ClientError::Api(failure)
    }
}
