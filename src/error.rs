use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code used when the request never produced a usable server answer.
pub const CLIENT_ERROR: &str = "CLIENT_ERROR";

/// Fallback message when neither the transport nor the server said anything useful.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Error half of every API call result.
///
/// Transport and parse failures carry [`CLIENT_ERROR`]; server-reported
/// failures carry the server's `code` or the numeric HTTP status.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message} ({code})")]
pub struct ApiError {
    pub message: String,
    pub code: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }

    pub fn client(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::new(UNKNOWN_ERROR_MESSAGE, CLIENT_ERROR)
        } else {
            Self::new(message, CLIENT_ERROR)
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.code == CLIENT_ERROR
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::client(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::client(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failures outside a single request: building the client, reading config.
#[derive(Error, Debug)]
pub enum ClimateError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClimateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transport_message_falls_back_to_unknown() {
        let err = ApiError::client("  ");
        assert_eq!(err.message, UNKNOWN_ERROR_MESSAGE);
        assert_eq!(err.code, CLIENT_ERROR);
        assert!(err.is_client_error());
    }

    #[test]
    fn display_includes_code() {
        let err = ApiError::new("Unauthorized", "AUTH_ERROR");
        assert_eq!(err.to_string(), "Unauthorized (AUTH_ERROR)");
        assert!(!err.is_client_error());
    }
}
