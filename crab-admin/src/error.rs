//! Client error types

use shared::ValidationError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Transport failure, no response received
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body did not match the expected schema
    #[error("Invalid response: {0}")]
    Decode(String),

    /// A dashboard sub-fetch failed; carries the first failure observed
    #[error("{endpoint} failed: {message}")]
    Aggregate {
        endpoint: &'static str,
        message: String,
    },
}

impl ClientError {
    /// Session expired or token rejected
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Http { status: 401, .. })
    }

    /// Wrap a sub-fetch failure for the dashboard fan-out
    pub(crate) fn aggregate(endpoint: &'static str, err: ClientError) -> Self {
        let message = match err {
            ClientError::Aggregate { message, .. } => message,
            other => other.to_string(),
        };
        ClientError::Aggregate { endpoint, message }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
