use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a response (connection, TLS, timeout...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("booking backend responded with {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
}

impl ApiError {
    /// The `error` text the backend put in its response body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            ApiError::Http(_) => None,
        }
    }
}
